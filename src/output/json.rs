use crate::crawler::{PageExport, PageRecord};
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Export views of `records`, in id order
fn exports_by_id(records: &[Arc<PageRecord>]) -> Vec<PageExport<'_>> {
    let mut exports: Vec<PageExport<'_>> = records.iter().map(|r| r.to_export()).collect();
    exports.sort_by_key(|e| e.id);
    exports
}

/// Serializes every record as a pretty JSON array, in id order
pub fn records_to_json(records: &[Arc<PageRecord>]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&exports_by_id(records))?)
}

/// Writes all records to `path` as a JSON array
///
/// Same content and ordering as [`records_to_json`].
pub fn write_records_json(records: &[Arc<PageRecord>], path: &Path) -> OutputResult<()> {
    let exports = exports_by_id(records);

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &exports)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Wrote {} records to {}", exports.len(), path.display());
    Ok(())
}
