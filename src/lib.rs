//! Bundlesum: Deterministic Manifest Generation for API Proxy Bundles
//!
//! Enumerates a bundle's policy, proxy-endpoint, and resource files,
//! checksums each with SHA-512, emits a normalized XML manifest, and
//! rewrites the bundle's top-level proxy descriptor to reference the
//! manifest's own checksum.

pub mod bundle;
pub mod cli;
pub mod descriptor;
pub mod digest;
pub mod error;
pub mod generate;
pub mod logging;
pub mod manifest;
pub mod xml;
