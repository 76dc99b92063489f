//! The manifest document: five artifact categories and their checksums.

use crate::xml::XmlElement;

/// A single manifest entry: logical resource name plus tagged digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub name: String,
    /// Tagged digest, e.g. `SHA-512:<hex>`.
    pub digest: String,
}

/// The five-category manifest document.
///
/// Only Policies, ProxyEndpoints, and Resources are ever populated;
/// SharedFlows and TargetEndpoints are structurally present but always
/// empty because the target schema requires the elements either way.
/// Built once per run, never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    pub policies: Vec<ResourceEntry>,
    pub proxy_endpoints: Vec<ResourceEntry>,
    pub resources: Vec<ResourceEntry>,
    pub shared_flows: Vec<ResourceEntry>,
    pub target_endpoints: Vec<ResourceEntry>,
}

impl ManifestDocument {
    /// Assemble a document from pre-sorted category lists.
    ///
    /// Pure structural transform: no hashing, no I/O. That keeps the
    /// document shape testable independently of checksum computation.
    pub fn build(
        policies: Vec<ResourceEntry>,
        proxy_endpoints: Vec<ResourceEntry>,
        resources: Vec<ResourceEntry>,
    ) -> Self {
        ManifestDocument {
            policies,
            proxy_endpoints,
            resources,
            shared_flows: Vec::new(),
            target_endpoints: Vec::new(),
        }
    }

    /// Emit the document as an element tree with a fixed category order.
    pub fn to_xml(&self) -> XmlElement {
        XmlElement::new("Manifest")
            .with_attribute("name", "manifest")
            .with_child(category("Policies", &self.policies))
            .with_child(category("ProxyEndpoints", &self.proxy_endpoints))
            .with_child(category("Resources", &self.resources))
            .with_child(category("SharedFlows", &self.shared_flows))
            .with_child(category("TargetEndpoints", &self.target_endpoints))
    }
}

fn category(name: &str, entries: &[ResourceEntry]) -> XmlElement {
    let mut element = XmlElement::new(name);
    for entry in entries {
        element.children.push(
            XmlElement::new("VersionInfo")
                .with_attribute("resourceName", entry.name.clone())
                .with_attribute("version", entry.digest.clone()),
        );
    }
    element
}
