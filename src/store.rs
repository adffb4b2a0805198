use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

use crate::model::{DocumentHeader, IndexCatalog, QuizDocument};

pub struct FileStat {
    pub size: u64,
    pub modified: NaiveDateTime,
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ── Documents ──

/// `Ok(None)` when the markup file does not exist.
pub fn read_markup(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(html) => Ok(Some(html)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

pub fn write_document(path: &Path, doc: &QuizDocument) -> Result<()> {
    write_json(path, doc)
}

pub fn read_header(path: &Path) -> Result<DocumentHeader> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("invalid JSON document")
}

pub fn file_stat(path: &Path) -> Result<FileStat> {
    let meta = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?;
    let modified: DateTime<Local> = meta.modified()?.into();
    Ok(FileStat {
        size: meta.len(),
        modified: modified.naive_local(),
    })
}

/// `*.json` files directly under `dir`, by name, minus hidden files and
/// the catalog itself.
pub fn list_documents(dir: &Path, index_file: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') || name == index_file || !name.ends_with(".json") {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

// ── Catalog ──

/// `Ok(None)` when there is no catalog yet; unreadable or malformed
/// catalogs are errors for the caller to downgrade.
pub fn load_catalog(path: &Path) -> Result<Option<IndexCatalog>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let catalog = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed catalog {}", path.display()))?;
    Ok(Some(catalog))
}

/// Whole-file rewrite; not crash-safe.
pub fn save_catalog(path: &Path, catalog: &IndexCatalog) -> Result<()> {
    write_json(path, catalog)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
