//! Coverage threshold classification

use std::fmt;

use super::{Aggregator, PackageStats};

pub const DEFAULT_THRESHOLD: f64 = 75.0;

/// Whether a package meets the coverage threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Good,
    NeedsWork,
}

impl Status {
    /// `Good` iff `percentage >= threshold`, the boundary itself counts as good.
    pub fn classify(percentage: f64, threshold: f64) -> Self {
        if percentage >= threshold {
            Status::Good
        } else {
            Status::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Good => "Good",
            Status::NeedsWork => "Needs Work",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the package table
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub percentage: f64,
    pub status: Status,
    pub stats: PackageStats,
}

impl ReportRow {
    pub fn missing(&self) -> u64 {
        self.stats.missing()
    }
}

/// Last path segment of a package key
pub fn short_name(package: &str) -> &str {
    package.rsplit('/').next().unwrap_or(package)
}

/// Build report rows sorted ascending by coverage.
///
/// Packages with no statements are left out. Ties keep package key order.
pub fn build_rows(aggregator: &Aggregator, threshold: f64) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = aggregator
        .packages()
        .iter()
        .filter(|(_, stats)| stats.total > 0)
        .map(|(package, stats)| {
            let percentage = stats.percentage();
            ReportRow {
                name: short_name(package).to_string(),
                percentage,
                status: Status::classify(percentage, threshold),
                stats: *stats,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
    rows
}

/// Rows strictly below the threshold
pub fn needing_improvement(rows: &[ReportRow], threshold: f64) -> Vec<&ReportRow> {
    rows.iter().filter(|row| row.percentage < threshold).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{parse_line, PackageMatcher};

    fn aggregate(lines: &[&str]) -> Aggregator {
        let mut aggregator = Aggregator::new(PackageMatcher::new("pkg").unwrap());
        let records: Vec<_> = lines.iter().filter_map(|l| parse_line(l)).collect();
        aggregator.fold(&records);
        aggregator
    }

    #[test]
    fn test_status_boundary() {
        assert_eq!(Status::classify(75.0, 75.0), Status::Good);
        assert_eq!(Status::classify(74.99, 75.0), Status::NeedsWork);
        assert_eq!(Status::classify(100.0, 75.0), Status::Good);
        assert_eq!(Status::classify(0.0, 75.0), Status::NeedsWork);
        assert_eq!(Status::NeedsWork.to_string(), "Needs Work");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("github.com/junbin-yang/go-kitbox/pkg/timer"), "timer");
        assert_eq!(short_name("pkg/doc.go"), "doc.go");
        assert_eq!(short_name("timer"), "timer");
    }

    #[test]
    fn test_rows_sorted_ascending() {
        let aggregator = aggregate(&[
            "pkg/b/file.go:1.1,2.2 4 4",
            "pkg/a/file.go:1.1,2.2 5 1",
            "pkg/a/file2.go:3.1,4.2 10 0",
            "pkg/c/file.go:1.1,2.2 3 1",
            "pkg/c/file.go:3.1,4.2 1 0",
        ]);

        let rows = build_rows(&aggregator, DEFAULT_THRESHOLD);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["a", "c", "b"]);
        assert_eq!(rows[0].status, Status::NeedsWork);
        assert_eq!(rows[1].status, Status::Good);
        assert!((rows[1].percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].missing(), 10);
    }

    #[test]
    fn test_ties_keep_key_order() {
        let aggregator = aggregate(&[
            "pkg/zeta/file.go:1.1,2.2 2 1",
            "pkg/alpha/file.go:1.1,2.2 4 2",
        ]);

        let rows = build_rows(&aggregator, DEFAULT_THRESHOLD);
        assert_eq!(rows[0].name, "alpha");
        assert_eq!(rows[1].name, "zeta");
    }

    #[test]
    fn test_empty_packages_are_excluded() {
        let aggregator = aggregate(&[
            "pkg/empty/file.go:1.1,2.2 0 1",
            "pkg/a/file.go:1.1,2.2 5 1",
        ]);

        assert_eq!(aggregator.packages().len(), 2);
        let rows = build_rows(&aggregator, DEFAULT_THRESHOLD);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "a");
    }

    #[test]
    fn test_needing_improvement() {
        let aggregator = aggregate(&[
            "pkg/a/file.go:1.1,2.2 3 1",
            "pkg/a/file.go:3.1,4.2 1 0",
            "pkg/b/file.go:1.1,2.2 4 0",
        ]);

        let rows = build_rows(&aggregator, DEFAULT_THRESHOLD);
        let low = needing_improvement(&rows, DEFAULT_THRESHOLD);

        // a sits exactly on 75% and is not listed
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "b");
        assert_eq!(low[0].missing(), 4);
    }
}
