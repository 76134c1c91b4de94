//! Text report of per-package coverage

use colored::Colorize;
use std::fmt::Write;
use std::io::IsTerminal;

use crate::coverage::{build_rows, needing_improvement, Aggregator, PackageStats, ReportRow, Status};

const RULE_WIDTH: usize = 80;

/// Rows and totals ready to be rendered
#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub rows: Vec<ReportRow>,
    pub overall: PackageStats,
    pub threshold: f64,
}

impl CoverageReport {
    pub fn new(aggregator: &Aggregator, threshold: f64) -> Self {
        Self {
            rows: build_rows(aggregator, threshold),
            overall: aggregator.overall(),
            threshold,
        }
    }

    pub fn overall_percentage(&self) -> f64 {
        self.overall.percentage()
    }

    pub fn needing_improvement(&self) -> Vec<&ReportRow> {
        needing_improvement(&self.rows, self.threshold)
    }

    /// Write the report to stdout, coloured when stdout is a terminal
    pub fn print(&self) {
        print!("{}", self.render(std::io::stdout().is_terminal()));
    }

    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        let rule = "-".repeat(RULE_WIDTH);

        let _ = writeln!(out, "{}", heading("Coverage by Package:", color));
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{:<50} {:>10} {:>15}", "Package", "Coverage", "Status");
        let _ = writeln!(out, "{}", rule);

        for row in &self.rows {
            let status = format!("{:>15}", row.status.label());
            let _ = writeln!(
                out,
                "{:<50} {:>9.1}% {}",
                row.name,
                row.percentage,
                paint_status(status, row.status, color)
            );
        }

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{:<50} {:>9.1}%", "Overall", self.overall_percentage());
        let _ = writeln!(out);

        let _ = writeln!(out);
        let title = format!(
            "Packages needing improvement (< {}% coverage):",
            self.threshold
        );
        let _ = writeln!(out, "{}", heading(&title, color));
        let _ = writeln!(out, "{}", rule);

        for row in self.needing_improvement() {
            let _ = writeln!(
                out,
                "{:<30} {:>6.1}%  (need {:>4} more statements)",
                row.name,
                row.percentage,
                row.missing()
            );
        }

        out
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn paint_status(padded: String, status: Status, color: bool) -> String {
    if !color {
        return padded;
    }
    match status {
        Status::Good => padded.green().to_string(),
        Status::NeedsWork => padded.yellow().to_string(),
    }
}
