//! JSON persistence for normalized records.

use crate::error::Result;
use crate::normalize::PublicationRecord;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Render records as a pretty-printed (2-space) JSON array
pub fn render_records(records: &[PublicationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records to `path`, creating the parent directory if needed.
///
/// Any existing file is replaced; nothing is merged.
pub fn write_records(path: &Path, records: &[PublicationRecord]) -> Result<()> {
    write_json(path, records)?;
    debug!(path = %path.display(), count = records.len(), "Saved records");
    Ok(())
}

/// Write the unmodified API response next to the records
pub fn write_raw(path: &Path, raw: &serde_json::Value) -> Result<()> {
    write_json(path, raw)?;
    debug!(path = %path.display(), "Saved raw response");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}
