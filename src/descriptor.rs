//! Proxy descriptor discovery, parsing, and the manifest-version rewrite.
//!
//! The bundle's root-level descriptor file can have any name, so
//! identification is structural: scan `*.xml` files in directory listing
//! order and accept the first one whose root element is `APIProxy`.
//! Listing order is filesystem-dependent; bundles carry exactly one
//! descriptor in practice, which keeps the policy unambiguous.

use crate::bundle::scan::list_entries;
use crate::error::{BundleError, XmlError};
use crate::xml::{parse_document, XmlElement};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root element name a candidate file must carry.
const DESCRIPTOR_ROOT: &str = "APIProxy";

/// Child element receiving the manifest checksum.
const MANIFEST_VERSION: &str = "ManifestVersion";

/// The bundle's top-level metadata document.
///
/// Held as a full element tree rather than a fixed field list, so the
/// rewrite never drops elements or attributes this tool does not model.
/// The single permitted mutation is the ManifestVersion text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    root: XmlElement,
}

impl ProxyDescriptor {
    /// Accept an element tree as a descriptor if its root matches.
    pub fn from_xml(root: XmlElement) -> Result<Self, XmlError> {
        if root.name != DESCRIPTOR_ROOT {
            return Err(XmlError::Malformed(format!(
                "root element is <{}>, expected <{}>",
                root.name, DESCRIPTOR_ROOT
            )));
        }
        Ok(ProxyDescriptor { root })
    }

    /// Proxy name attribute, when present.
    pub fn name(&self) -> Option<&str> {
        self.root.attribute("name")
    }

    /// Revision attribute, when present.
    pub fn revision(&self) -> Option<&str> {
        self.root.attribute("revision")
    }

    /// Current ManifestVersion text, when present.
    pub fn manifest_version(&self) -> Option<&str> {
        self.root
            .child(MANIFEST_VERSION)
            .and_then(|c| c.text.as_deref())
    }

    /// Set the ManifestVersion text, creating the element when the
    /// descriptor does not carry one yet. Everything else passes through
    /// unchanged.
    pub fn set_manifest_version(&mut self, tagged_digest: &str) {
        match self.root.child_mut(MANIFEST_VERSION) {
            Some(child) => {
                child.text = Some(tagged_digest.to_string());
                child.children.clear();
            }
            None => {
                self.root
                    .children
                    .push(XmlElement::new(MANIFEST_VERSION).with_text(tagged_digest));
            }
        }
    }

    /// The underlying element tree, for rendering.
    pub fn as_xml(&self) -> &XmlElement {
        &self.root
    }
}

/// Outcome of evaluating one candidate file.
///
/// "First structurally valid candidate wins, in listing order" is an
/// explicit policy here; rejected candidates stay observable instead of
/// being silently skipped.
#[derive(Debug)]
pub enum CandidateOutcome {
    /// The file is a structurally valid descriptor.
    Descriptor(ProxyDescriptor),
    /// The file is readable but not a descriptor.
    Mismatch(XmlError),
    /// The file could not be read at all.
    Unreadable(io::Error),
}

/// Evaluate a single candidate path.
pub fn evaluate_candidate(path: &Path) -> CandidateOutcome {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => return CandidateOutcome::Unreadable(e),
    };
    match parse_document(&contents).and_then(ProxyDescriptor::from_xml) {
        Ok(descriptor) => CandidateOutcome::Descriptor(descriptor),
        Err(e) => CandidateOutcome::Mismatch(e),
    }
}

/// Scan the bundle root (non-recursive) for the proxy descriptor.
pub fn find_descriptor(bundle_dir: &Path) -> Result<(PathBuf, ProxyDescriptor), BundleError> {
    for entry in list_entries(bundle_dir)? {
        if entry.is_dir || !entry.name.ends_with(".xml") {
            continue;
        }
        match evaluate_candidate(&entry.path) {
            CandidateOutcome::Descriptor(descriptor) => {
                debug!("descriptor found at {}", entry.path.display());
                return Ok((entry.path, descriptor));
            }
            CandidateOutcome::Mismatch(reason) => {
                debug!("skipping {}: {}", entry.path.display(), reason);
            }
            CandidateOutcome::Unreadable(e) => {
                debug!("skipping {}: {}", entry.path.display(), e);
            }
        }
    }
    Err(BundleError::DescriptorNotFound(bundle_dir.to_path_buf()))
}
