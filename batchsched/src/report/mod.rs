/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Utilization report writer.
//!
//! Output layout:
//! ```text
//! NodeID,CPU Utilization (%),Memory Utilization (%)
//! 0,41.67,50.00
//! 1,0.00,0.00
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::node::NodeUtilization;

pub const CSV_HEADER: &str = "NodeID,CPU Utilization (%),Memory Utilization (%)";

/// Write `rows` as CSV, percentages with two decimals.
pub fn write_csv<W: Write>(rows: &[NodeUtilization], mut out: W) -> std::io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(
            out,
            "{},{:.2},{:.2}",
            row.node_id, row.cpu_pct, row.memory_pct
        )?;
    }
    out.flush()
}

/// Create (or truncate) `path` and write the report into it.
pub fn write_csv_file(rows: &[NodeUtilization], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create report file: {}", path.display()))?;
    write_csv(rows, BufWriter::new(file))
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "utilization report written");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn row(node_id: u32, cpu_pct: f64, memory_pct: f64) -> NodeUtilization {
        NodeUtilization {
            node_id,
            cpu_pct,
            memory_pct,
        }
    }

    fn render(rows: &[NodeUtilization]) -> String {
        let mut buf = Vec::new();
        write_csv(rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_for_no_rows() {
        assert_eq!(render(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn percentages_use_two_decimals() {
        let out = render(&[row(0, 100.0 * (10.0 / 24.0), 50.0), row(1, 0.0, 100.0)]);
        assert_eq!(
            out,
            "NodeID,CPU Utilization (%),Memory Utilization (%)\n\
             0,41.67,50.00\n\
             1,0.00,100.00\n"
        );
    }

    #[test]
    fn file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_csv_file(&[row(3, 12.5, 25.0)], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1), Some("3,12.50,25.00"));
    }

    #[test]
    fn file_writer_reports_bad_path() {
        let err = write_csv_file(&[], Path::new("/nonexistent/dir/report.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("Cannot create report file"));
    }
}
