//! Bundlesum CLI Binary
//!
//! Command-line interface for deterministic API-proxy bundle manifest
//! generation.

use bundlesum::cli::{format_report_json, format_report_text, map_error, Cli, ReportFormat};
use bundlesum::generate::{generate, resolve_bundle_dir, GenerateOptions};
use bundlesum::logging::init_logging;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Initialize logging early; everything diagnostic goes to stderr.
    if let Err(e) = init_logging(cli.log_level.as_deref(), cli.verbose) {
        eprintln!("{}", map_error(&e));
        process::exit(e.exit_code());
    }

    let bundle_dir = resolve_bundle_dir(&cli.bundle);
    info!("bundle: {}", bundle_dir.display());

    let options = GenerateOptions {
        on_hash_error: cli.on_hash_error.into(),
    };

    match generate(&bundle_dir, &options) {
        Ok(report) => {
            let output = match cli.format {
                ReportFormat::Text => format_report_text(&report),
                ReportFormat::Json => format_report_json(&report),
            };
            println!("{}", output);
        }
        Err(e) => {
            error!("run failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(e.exit_code());
        }
    }
}
