//! Per-package aggregation of coverage records

use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::io::BufRead;

use super::{profile_records, CoverageRecord, PackageStats};

/// Extracts a package key from a file path.
///
/// The key is `<prefix>/<segment>`, the prefix followed by the first path
/// segment after it. A file directly under the prefix is keyed by its own name.
#[derive(Debug, Clone)]
pub struct PackageMatcher {
    pattern: Regex,
}

impl PackageMatcher {
    pub fn new(prefix: &str) -> Result<Self> {
        let prefix = prefix.trim_end_matches('/');
        let pattern = Regex::new(&format!(r"^({}/[^/]+)", regex::escape(prefix)))
            .with_context(|| format!("Invalid package prefix: {}", prefix))?;
        Ok(Self { pattern })
    }

    pub fn package_key<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Folds coverage records into per-package totals
#[derive(Debug, Clone)]
pub struct Aggregator {
    matcher: PackageMatcher,
    packages: BTreeMap<String, PackageStats>,
    unmatched: usize,
}

impl Aggregator {
    pub fn new(matcher: PackageMatcher) -> Self {
        Self {
            matcher,
            packages: BTreeMap::new(),
            unmatched: 0,
        }
    }

    /// Add one record. Returns `false` if its path is outside every package.
    pub fn add(&mut self, record: &CoverageRecord) -> bool {
        let Some(key) = self.matcher.package_key(&record.path) else {
            return false;
        };

        match self.packages.get_mut(key) {
            Some(stats) => stats.add(record),
            None => {
                let mut stats = PackageStats::default();
                stats.add(record);
                self.packages.insert(key.to_string(), stats);
            }
        }
        true
    }

    pub fn fold<I>(&mut self, records: I)
    where
        I: IntoIterator,
        I::Item: Borrow<CoverageRecord>,
    {
        for record in records {
            if !self.add(record.borrow()) {
                self.unmatched += 1;
            }
        }
    }

    /// Fold a profile as it is read. Returns the number of records seen.
    pub fn fold_profile<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut seen = 0usize;
        for record in profile_records(reader) {
            let record = record.context("Failed to read coverage profile line")?;
            if !self.add(&record) {
                self.unmatched += 1;
            }
            seen += 1;
        }

        if self.unmatched > 0 {
            tracing::debug!(
                unmatched = self.unmatched,
                "records outside the package prefix were ignored"
            );
        }
        Ok(seen)
    }

    /// Aggregates keyed by full package key, in key order
    pub fn packages(&self) -> &BTreeMap<String, PackageStats> {
        &self.packages
    }

    /// Records whose path matched no package
    pub fn unmatched(&self) -> usize {
        self.unmatched
    }

    /// Totals across all packages
    pub fn overall(&self) -> PackageStats {
        let mut overall = PackageStats::default();
        for stats in self.packages.values() {
            overall.merge(stats);
        }
        overall
    }
}
