//! Result presentation.
//!
//! Text is for people (`<path>\t<size>` in input order, like the classic
//! tool). JSON (an array of `{path, total_bytes}`) and CSV always carry
//! exact byte counts; the grand total, when asked for, is a final `total` row.

use crate::args::OutputFormat;
use anyhow::Result;
use mdu_core::model::size::format_size;
use mdu_core::PathTotal;
use serde::Serialize;
use std::io::Write;

/// Label used for the grand-total line in text and CSV output.
pub const TOTAL_LABEL: &str = "total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub human_readable: bool,
    pub grand_total: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            human_readable: false,
            grand_total: false,
        }
    }
}

#[derive(Serialize)]
struct Row {
    path: String,
    total_bytes: u64,
}

impl From<&PathTotal> for Row {
    fn from(t: &PathTotal) -> Self {
        Self {
            path: t.path.to_string_lossy().into_owned(),
            total_bytes: t.total_bytes,
        }
    }
}

/// Write `totals` to `out` in the requested format.
pub fn render<W: Write>(totals: &[PathTotal], opts: &RenderOptions, out: &mut W) -> Result<()> {
    let grand_total: u64 = totals.iter().map(|t| t.total_bytes).sum();
    let total_row = || Row {
        path: TOTAL_LABEL.to_string(),
        total_bytes: grand_total,
    };

    match opts.format {
        OutputFormat::Text => {
            let size = |bytes: u64| {
                if opts.human_readable {
                    format_size(bytes)
                } else {
                    bytes.to_string()
                }
            };
            for t in totals {
                writeln!(out, "{}\t{}", t.path.display(), size(t.total_bytes))?;
            }
            if opts.grand_total {
                writeln!(out, "{TOTAL_LABEL}\t{}", size(grand_total))?;
            }
        }
        OutputFormat::Json => {
            let mut rows: Vec<Row> = totals.iter().map(Row::from).collect();
            if opts.grand_total {
                rows.push(total_row());
            }
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for t in totals {
                writer.serialize(Row::from(t))?;
            }
            if opts.grand_total {
                writer.serialize(total_row())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
