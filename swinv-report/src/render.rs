//! Result rendering
//!
//! Projects aggregated records onto the fixed output column set as a
//! plain-text table, CSV, or JSON. Interactive filtering and sorting are
//! the presentation layer's concern, not handled here.

use crate::models::AggregatedRecord;
use clap::ValueEnum;
use std::io::Write;
use swinv_common::Result;

/// Output column set, in presentation order
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "Softwarebezeichnung",
    "Softwarekategorie",
    "Fachbereich",
    "Softwarebeschreibung",
    "Gesamtanzahl",
    "Version Details",
];

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// Headered CSV
    Csv,
    /// JSON array of records
    Json,
}

/// Render aggregated records in the requested format
pub fn render(
    records: &[AggregatedRecord],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(records, out),
        OutputFormat::Csv => render_csv(records, out),
        OutputFormat::Json => render_json(records, out),
    }
}

fn fields(record: &AggregatedRecord) -> [String; 6] {
    [
        record.canonical_title.clone(),
        record.category.clone(),
        record.department.clone(),
        record.description.clone(),
        record.total_install_count.to_string(),
        record.version_details.clone(),
    ]
}

fn render_table(records: &[AggregatedRecord], out: &mut dyn Write) -> Result<()> {
    let rows: Vec<[String; 6]> = records.iter().map(fields).collect();

    let mut widths: Vec<usize> = OUTPUT_COLUMNS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    for (i, header) in OUTPUT_COLUMNS.iter().enumerate() {
        if i > 0 {
            write!(out, "  ")?;
        }
        write!(out, "{:<width$}", header, width = widths[i])?;
    }
    writeln!(out)?;

    let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    writeln!(out, "{}", "-".repeat(total_width))?;

    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                write!(out, "  ")?;
            }
            // Gesamtanzahl is numeric and reads better right-aligned
            if OUTPUT_COLUMNS[i] == "Gesamtanzahl" {
                write!(out, "{:>width$}", cell, width = widths[i])?;
            } else {
                write!(out, "{:<width$}", cell, width = widths[i])?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

fn render_csv(records: &[AggregatedRecord], out: &mut dyn Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(OUTPUT_COLUMNS)
        .map_err(std::io::Error::other)?;
    for record in records {
        writer
            .write_record(fields(record))
            .map_err(std::io::Error::other)?;
    }
    writer.flush()?;
    Ok(())
}

fn render_json(records: &[AggregatedRecord], out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, records).map_err(std::io::Error::other)?;
    writeln!(out)?;
    Ok(())
}
