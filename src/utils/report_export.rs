//! 渠道报表导出（CSV / JSON）

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::errors::{ChannelizerError, Result};
use crate::pipeline::ChannelCount;

/// 未归因行在报表中显示的渠道名
pub const UNATTRIBUTED_LABEL: &str = "(none)";

/// CSV 行
#[derive(Debug, Clone, Serialize)]
pub struct ReportCsvRow<'a> {
    pub channel: &'a str,
    pub pageview_count: u64,
}

impl<'a> From<&'a ChannelCount> for ReportCsvRow<'a> {
    fn from(row: &'a ChannelCount) -> Self {
        Self {
            channel: row.channel.as_deref().unwrap_or(UNATTRIBUTED_LABEL),
            pageview_count: row.pageview_count,
        }
    }
}

/// 写出带表头的 CSV
pub fn write_csv<W: Write>(rows: &[ChannelCount], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    for row in rows {
        csv_writer.serialize(ReportCsvRow::from(row)).map_err(|e| {
            ChannelizerError::serialization(format!("Failed to write CSV row: {}", e))
        })?;
    }
    csv_writer
        .flush()
        .map_err(|e| ChannelizerError::file_operation(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

pub fn export_to_csv<P: AsRef<Path>>(rows: &[ChannelCount], path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .map_err(|e| ChannelizerError::file_operation(format!("Failed to create file: {}", e)))?;
    write_csv(rows, BufWriter::new(file))
}

pub fn render_json(rows: &[ChannelCount]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn export_to_json<P: AsRef<Path>>(rows: &[ChannelCount], path: P) -> Result<()> {
    let content = render_json(rows)?;
    std::fs::write(path.as_ref(), content)
        .map_err(|e| ChannelizerError::file_operation(format!("Failed to write file: {}", e)))
}
