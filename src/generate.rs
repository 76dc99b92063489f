//! Run orchestration: the manifest pipeline from bundle directory to
//! rewritten descriptor.
//!
//! Entirely sequential. Every collection happens before any output is
//! written, so an enumeration failure aborts the run with the bundle
//! untouched. The manifest write and the descriptor rewrite remain two
//! separate phases; a failure between them leaves the new manifest on
//! disk with the old descriptor (accepted, not transactional).

use crate::bundle::scan::list_entries;
use crate::bundle::{collect, strip_suffix_name, HashErrorPolicy};
use crate::descriptor::find_descriptor;
use crate::digest::{file_digest, tagged_digest};
use crate::error::BundleError;
use crate::manifest::{ManifestDocument, ResourceEntry};
use crate::xml::render_document;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Conventional name of the bundle folder.
pub const BUNDLE_DIR_NAME: &str = "apiproxy";

/// Run options.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Per-file digest failure handling inside collections.
    pub on_hash_error: HashErrorPolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            on_hash_error: HashErrorPolicy::SkipWithEmptyDigest,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub bundle_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub descriptor_path: PathBuf,
    /// Raw hex SHA-512 of the written manifest file.
    pub manifest_digest: String,
    pub policies: usize,
    pub proxy_endpoints: usize,
    pub resources: usize,
}

/// Append the conventional folder name when the argument points at the
/// bundle's parent instead of the bundle itself.
pub fn resolve_bundle_dir(arg: &Path) -> PathBuf {
    match arg.file_name() {
        Some(name) if name == BUNDLE_DIR_NAME => arg.to_path_buf(),
        _ => {
            info!("appending {} to bundle path", BUNDLE_DIR_NAME);
            arg.join(BUNDLE_DIR_NAME)
        }
    }
}

/// Execute the full pipeline against a resolved bundle directory.
pub fn generate(
    bundle_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerateReport, BundleError> {
    let (descriptor_path, mut descriptor) = find_descriptor(bundle_dir)?;
    info!("descriptor: {}", descriptor_path.display());

    let policies = collect(
        &bundle_dir.join("policies"),
        strip_suffix_name(".xml"),
        options.on_hash_error,
    )?;
    let proxy_endpoints = collect(
        &bundle_dir.join("proxies"),
        strip_suffix_name(".xml"),
        options.on_hash_error,
    )?;
    let resources = collect_resources(&bundle_dir.join("resources"), options.on_hash_error)?;

    let document = ManifestDocument::build(policies, proxy_endpoints, resources);
    let manifest_xml = render_document(&document.to_xml())?;

    let manifests_dir = bundle_dir.join("manifests");
    fs::create_dir_all(&manifests_dir).map_err(|e| BundleError::io(&manifests_dir, e))?;
    let manifest_path = manifests_dir.join("manifest.xml");
    fs::write(&manifest_path, manifest_xml).map_err(|e| BundleError::io(&manifest_path, e))?;
    info!("wrote {}", manifest_path.display());

    // The descriptor references the checksum of the manifest as written
    // to disk, not the in-memory rendering.
    let manifest_digest = file_digest(&manifest_path)?;
    descriptor.set_manifest_version(&tagged_digest(&manifest_digest));

    let descriptor_xml = render_document(descriptor.as_xml())?;
    fs::write(&descriptor_path, descriptor_xml)
        .map_err(|e| BundleError::io(&descriptor_path, e))?;
    info!("wrote {}", descriptor_path.display());

    Ok(GenerateReport {
        bundle_dir: bundle_dir.to_path_buf(),
        manifest_path,
        descriptor_path,
        manifest_digest,
        policies: document.policies.len(),
        proxy_endpoints: document.proxy_endpoints.len(),
        resources: document.resources.len(),
    })
}

/// Two-level resource scan: one namespace per subdirectory of
/// `resources/`, logical names `<namespace>://<file>`.
///
/// The combined list is re-sorted at the end so the Resources category is
/// ordered by full logical name, independent of namespace listing order.
fn collect_resources(
    resources_dir: &Path,
    policy: HashErrorPolicy,
) -> Result<Vec<ResourceEntry>, BundleError> {
    let mut all = Vec::new();
    for entry in list_entries(resources_dir)? {
        if !entry.is_dir {
            continue;
        }
        let namespace = entry.name.clone();
        let entries = collect(
            &entry.path,
            move |file| format!("{}://{}", namespace, file.name),
            policy,
        )?;
        all.extend(entries);
    }
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(all)
}
