//! File discovery and writing around the pipeline.

use crate::error::{EtymError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files under `root` with the given extension, sorted.
pub fn discover_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| EtymError::Walk {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == extension)
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Create `dir` and its parents. Safe to call repeatedly.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| EtymError::io(dir, e))
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| EtymError::io(path, e))
}

/// Where the output for `file` goes: its path relative to `input_root`,
/// re-rooted under `output_root`, with a new extension.
pub fn output_path(input_root: &Path, file: &Path, output_root: &Path, extension: &str) -> PathBuf {
    let relative = file.strip_prefix(input_root).unwrap_or(file);
    output_root.join(relative).with_extension(extension)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let file = File::create(path).map_err(|e| EtymError::io(path, e))?;
    Ok(BufWriter::new(file))
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer).map_err(|e| EtymError::io(path, e))?;
    writer.flush().map_err(|e| EtymError::io(path, e))
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    let mut writer = create(path)?;
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| EtymError::io(path, e))?;
    writer.flush().map_err(|e| EtymError::io(path, e))
}
