//! Go coverage profile parser
//!
//! Profiles look like:
//!
//! ```text
//! mode: set
//! github.com/org/repo/pkg/config/config.go:12.34,14.2 2 1
//! ```
//!
//! Each block line carries `<path>:<start>,<end> <statements> <executions>`.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::CoverageRecord;

const MODE_PREFIX: &str = "mode:";

/// Open a coverage profile for streaming
pub fn open_profile(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open coverage profile: {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Records of a profile, parsed one line at a time.
///
/// Lines that do not parse are skipped; read failures are yielded as errors.
pub fn profile_records<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<CoverageRecord>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) => parse_line(&line).map(Ok),
        Err(e) => Some(Err(e)),
    })
}

/// Parse a single profile line.
///
/// Returns `None` for the mode header, for lines with fewer than three
/// fields and for lines whose counts are not unsigned integers.
pub fn parse_line(line: &str) -> Option<CoverageRecord> {
    if line.starts_with(MODE_PREFIX) {
        return None;
    }

    let mut fields = line.split_whitespace();
    let (Some(location), Some(statements), Some(executions)) =
        (fields.next(), fields.next(), fields.next())
    else {
        if !line.trim().is_empty() {
            tracing::debug!(line, "skipping line with too few fields");
        }
        return None;
    };

    let path = location.split(':').next().unwrap_or(location);

    let statements = match statements.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            tracing::debug!(line, "skipping line with invalid statement count");
            return None;
        }
    };
    let executions = match executions.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            tracing::debug!(line, "skipping line with invalid execution count");
            return None;
        }
    };

    Some(CoverageRecord {
        path: path.to_string(),
        statements,
        executions,
    })
}
