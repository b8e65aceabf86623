//! Report output
//!
//! CSV is the primary format: header `zipcode,rate`, one line per target zip,
//! rate with two decimals or an empty trailing field. JSON is available for
//! downstream tooling.

use crate::error::Result;
use crate::pipeline::SlcspRow;
use std::io::Write;

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

pub fn write_report<W: Write>(rows: &[SlcspRow], format: ReportFormat, writer: W) -> Result<()> {
    match format {
        ReportFormat::Csv => write_csv(rows, writer),
        ReportFormat::Json => write_json(rows, writer),
    }
}

pub fn write_csv<W: Write>(rows: &[SlcspRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(["zipcode", "rate"])?;
    for row in rows {
        csv_writer.write_record([row.zipcode.as_str(), format_rate(row.rate).as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(rows: &[SlcspRow], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map(|rate| format!("{:.2}", rate)).unwrap_or_default()
}
