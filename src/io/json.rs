use std::{fs::File, io::{BufReader, BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::normalize::RawState;

/// Reads the nested per-state source structure from a JSON file at `path`.
pub fn read_source_json(path: &Path) -> Result<Vec<RawState>> {
    let file = File::open(path)
        .with_context(|| format!("[io::json::read] Failed to open source file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::json::read] Failed to parse source records from {:?}", path))
}

/// Reads the nested per-state source structure from JSON text.
pub fn read_source_str(json: &str) -> Result<Vec<RawState>> {
    serde_json::from_str(json).context("[io::json::read] Failed to parse source records from string")
}

/// Writes any serializable report as pretty-printed JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::json::write] Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("[io::json::write] Failed to write JSON to {:?}", path))?;
    writer.flush()?;
    Ok(())
}
