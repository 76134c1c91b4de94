//! covpkg - per-package coverage for Go coverage profiles
//!
//! Reads a `go test -coverprofile` output and:
//! - Groups statement blocks by package under a fixed import prefix
//! - Computes covered/total statement percentages per package
//! - Prints a table sorted by coverage and lists packages below a threshold

pub mod config;
pub mod coverage;
pub mod report;

use anyhow::{Context, Result};

pub use config::Config;
pub use coverage::{Aggregator, CoverageRecord, PackageMatcher, PackageStats, ReportRow, Status};
pub use report::CoverageReport;

/// Read the configured profile and build the package report.
///
/// The whole profile is consumed before anything is rendered, so a read
/// failure produces no partial output.
pub fn build_report(config: &Config) -> Result<CoverageReport> {
    let matcher = PackageMatcher::new(&config.package_prefix)?;
    let reader = coverage::open_profile(&config.input)?;

    let mut aggregator = Aggregator::new(matcher);
    let records = aggregator.fold_profile(reader).with_context(|| {
        format!("Failed to read coverage profile: {}", config.input.display())
    })?;

    tracing::info!(
        packages = aggregator.packages().len(),
        records,
        unmatched = aggregator.unmatched(),
        "aggregated coverage"
    );

    Ok(CoverageReport::new(&aggregator, config.threshold))
}
