//! Coverage module
//!
//! Provides:
//! - Go coverage profile parsing
//! - Per-package aggregation
//! - Threshold classification

mod aggregate;
mod profile;
mod threshold;

pub use aggregate::*;
pub use profile::*;
pub use threshold::*;

/// One block line from a coverage profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    pub path: String,
    pub statements: u64,
    pub executions: u64,
}

impl CoverageRecord {
    pub fn is_covered(&self) -> bool {
        self.executions > 0
    }
}

/// Running statement totals for a single package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageStats {
    pub total: u64,
    pub covered: u64,
}

impl PackageStats {
    /// Counters saturate at `u64::MAX`, which keeps `covered <= total`.
    pub fn add(&mut self, record: &CoverageRecord) {
        self.total = self.total.saturating_add(record.statements);
        if record.is_covered() {
            self.covered = self.covered.saturating_add(record.statements);
        }
    }

    pub fn merge(&mut self, other: &PackageStats) {
        self.total = self.total.saturating_add(other.total);
        self.covered = self.covered.saturating_add(other.covered);
    }

    pub fn percentage(&self) -> f64 {
        calculate_percentage(self.covered, self.total)
    }

    /// Statements not executed by any test.
    pub fn missing(&self) -> u64 {
        self.total - self.covered
    }
}

/// Percentage of `covered` over `total`, 0 when there is nothing to cover
pub fn calculate_percentage(covered: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (covered as f64 / total as f64) * 100.0
}
