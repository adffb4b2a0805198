use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use indicatif::ProgressBar;
use tracing::debug;

use crate::model::{Diagnostic, DocumentHeader, IndexCatalog, IndexEntry, IndexInfo};
use crate::store::{self, FileStat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    Added,
    Updated,
}

/// Catalog being reconciled: entries stay in insertion order with a
/// title lookup until `finish` sorts them.
pub struct Catalog {
    created_at: NaiveDateTime,
    entries: Vec<IndexEntry>,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(catalog: IndexCatalog) -> Self {
        let mut by_title = HashMap::with_capacity(catalog.quizzes.len());
        for (i, entry) in catalog.quizzes.iter().enumerate() {
            by_title.entry(entry.quiz_title.clone()).or_insert(i);
        }
        Catalog {
            created_at: catalog.index_info.created_at,
            entries: catalog.quizzes,
            by_title,
        }
    }

    /// Same title (exact, case-sensitive) replaces in place and keeps the
    /// original `added_at`; anything else is appended.
    pub fn merge(&mut self, mut entry: IndexEntry) -> Merge {
        match self.by_title.get(&entry.quiz_title) {
            Some(&i) => {
                entry.added_at = self.entries[i].added_at;
                self.entries[i] = entry;
                Merge::Updated
            }
            None => {
                self.by_title
                    .insert(entry.quiz_title.clone(), self.entries.len());
                self.entries.push(entry);
                Merge::Added
            }
        }
    }

    /// Sorted by lowercased title; equal keys keep their merge order.
    pub fn finish(self, now: NaiveDateTime) -> IndexCatalog {
        let mut quizzes = self.entries;
        quizzes.sort_by_cached_key(|e| e.quiz_title.to_lowercase());
        IndexCatalog {
            index_info: IndexInfo {
                created_at: self.created_at,
                last_updated: now,
                total_quizzes: quizzes.len(),
            },
            quizzes,
        }
    }
}

pub fn entry_for(source_file: &str, header: DocumentHeader, stat: &FileStat, now: NaiveDateTime) -> IndexEntry {
    IndexEntry {
        source_file: source_file.to_string(),
        last_modified: stat.modified,
        file_size: stat.size,
        actual_questions: header.questions.len(),
        quiz_title: header.quiz_title,
        description: header.description,
        total_questions: header.total_questions,
        questions_per_quiz: header.questions_per_quiz,
        added_at: now,
    }
}

pub struct Reconciliation {
    pub catalog: IndexCatalog,
    pub scanned: usize,
    /// (source file, quiz title, outcome) in processing order.
    pub merged: Vec<(String, String, Merge)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reconciliation {
    pub fn count(&self, kind: Merge) -> usize {
        self.merged.iter().filter(|(_, _, m)| *m == kind).count()
    }
}

/// Fold every document in `dir` into the catalog at `dir/index_file` and
/// rewrite it. Returns `None`, writing nothing, when there are no documents.
pub fn reconcile(dir: &Path, index_file: &str, progress: &ProgressBar) -> Result<Option<Reconciliation>> {
    let files = store::list_documents(dir, index_file)?;
    if files.is_empty() {
        return Ok(None);
    }

    let index_path = dir.join(index_file);
    let mut diagnostics = Vec::new();
    let existing = match store::load_catalog(&index_path) {
        Ok(Some(catalog)) => catalog,
        Ok(None) => IndexCatalog::empty(store::now()),
        Err(e) => {
            diagnostics.push(Diagnostic::new(
                index_file,
                format!("{:#}; starting a new catalog", e),
            ));
            IndexCatalog::empty(store::now())
        }
    };
    debug!("loaded catalog with {} entries", existing.quizzes.len());

    let mut catalog = Catalog::new(existing);
    let mut merged = Vec::with_capacity(files.len());

    progress.set_length(files.len() as u64);
    for path in &files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let parsed = store::read_header(path).and_then(|h| store::file_stat(path).map(|s| (h, s)));
        match parsed {
            Ok((header, stat)) => {
                let entry = entry_for(&name, header, &stat, store::now());
                let title = entry.quiz_title.clone();
                let outcome = catalog.merge(entry);
                debug!(file = %name, ?outcome, "merged {}", title);
                merged.push((name, title, outcome));
            }
            Err(e) => diagnostics.push(Diagnostic::new(name, format!("{:#}", e))),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let catalog = catalog.finish(store::now());
    store::save_catalog(&index_path, &catalog)?;

    Ok(Some(Reconciliation {
        catalog,
        scanned: files.len(),
        merged,
        diagnostics,
    }))
}

// ── Tests ──
