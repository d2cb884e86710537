use crate::crawler::PageRecord;
use crate::output::{OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes the raw content of a record to `{dir}/{id}.html`
///
/// The directory is created if it does not exist. An existing file for the
/// same id is overwritten.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - The directory or file could not be written
pub fn save_page(record: &PageRecord, dir: &Path) -> OutputResult<PathBuf> {
    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::Write(format!(
            "{} exists and is not a directory",
            dir.display()
        )));
    }
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("{}.html", record.id()));
    fs::write(&path, record.content())?;

    tracing::debug!("Saved page {} to {}", record.id(), path.display());
    Ok(path)
}

/// Saves every record into `dir`, returning the written paths
pub fn save_pages(records: &[Arc<PageRecord>], dir: &Path) -> OutputResult<Vec<PathBuf>> {
    let paths = records
        .iter()
        .map(|record| save_page(record, dir))
        .collect::<OutputResult<Vec<_>>>()?;

    tracing::info!("Saved {} pages to {}", paths.len(), dir.display());
    Ok(paths)
}
