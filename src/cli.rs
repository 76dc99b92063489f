//! CLI surface: clap definitions, report presentation, error mapping.

use crate::bundle::HashErrorPolicy;
use crate::error::BundleError;
use crate::generate::GenerateReport;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Bundlesum CLI - deterministic manifest generation for API proxy bundles
#[derive(Parser)]
#[command(name = "bundlesum")]
#[command(about = "Deterministic manifest generation for API proxy bundles")]
pub struct Cli {
    /// Bundle directory (the apiproxy folder, or its parent)
    pub bundle: PathBuf,

    /// Per-file digest failure handling
    #[arg(long, value_enum, default_value = "skip")]
    pub on_hash_error: OnHashError,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// CLI spelling of the per-file digest failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnHashError {
    /// Emit the entry with an empty digest and keep going
    Skip,
    /// Abort the run on the first failed digest
    Abort,
}

impl From<OnHashError> for HashErrorPolicy {
    fn from(value: OnHashError) -> Self {
        match value {
            OnHashError::Skip => HashErrorPolicy::SkipWithEmptyDigest,
            OnHashError::Abort => HashErrorPolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Render a completed run for the terminal.
pub fn format_report_text(report: &GenerateReport) -> String {
    format!(
        "wrote {}\nwrote {}\nmanifest digest: SHA-512:{}\npolicies: {}, proxy endpoints: {}, resources: {}",
        report.manifest_path.display(),
        report.descriptor_path.display(),
        report.manifest_digest,
        report.policies,
        report.proxy_endpoints,
        report.resources,
    )
}

/// Render a completed run as JSON.
pub fn format_report_json(report: &GenerateReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Map domain errors to a stable single-line CLI message.
pub fn map_error(e: &BundleError) -> String {
    e.to_string()
}
