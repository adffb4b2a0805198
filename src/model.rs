use std::fmt;

use chrono::NaiveDateTime;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

// ── Questions ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// Exact match against a canonical label; callers trim first.
    pub fn parse(s: &str) -> Option<Letter> {
        match s {
            "A" => Some(Letter::A),
            "B" => Some(Letter::B),
            "C" => Some(Letter::C),
            "D" => Some(Letter::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub letter: Letter,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: usize,
    pub question: String,
    pub options: Vec<OptionRecord>,
    pub correct_answer: Option<Letter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub quiz_title: String,
    pub description: String,
    pub total_questions: usize,
    pub questions_per_quiz: usize,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    NoOptions,
    NoCorrectAnswer,
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incomplete::NoOptions => f.write_str("no options"),
            Incomplete::NoCorrectAnswer => f.write_str("no correct answer"),
        }
    }
}

impl QuizDocument {
    /// Degraded questions by id. A question without options is reported
    /// as `NoOptions` only, even though it also lacks an answer.
    pub fn incomplete(&self) -> Vec<(usize, Incomplete)> {
        self.questions
            .iter()
            .filter_map(|q| {
                if q.options.is_empty() {
                    Some((q.id, Incomplete::NoOptions))
                } else if q.correct_answer.is_none() {
                    Some((q.id, Incomplete::NoCorrectAnswer))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Read-side view of a quiz document, tolerant of missing fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocumentHeader {
    pub quiz_title: String,
    pub description: String,
    pub total_questions: usize,
    pub questions_per_quiz: usize,
    pub questions: Vec<IgnoredAny>,
}

// ── Catalog ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub source_file: String,
    pub last_modified: NaiveDateTime,
    pub file_size: u64,
    pub quiz_title: String,
    pub description: String,
    pub total_questions: usize,
    pub questions_per_quiz: usize,
    pub actual_questions: usize,
    pub added_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub total_quizzes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCatalog {
    pub index_info: IndexInfo,
    #[serde(default)]
    pub quizzes: Vec<IndexEntry>,
}

impl IndexCatalog {
    pub fn empty(now: NaiveDateTime) -> Self {
        IndexCatalog {
            index_info: IndexInfo {
                created_at: now,
                last_updated: now,
                total_quizzes: 0,
            },
            quizzes: Vec::new(),
        }
    }
}

// ── Diagnostics ──

/// A per-item failure recorded during a batch; the batch carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub item: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            item: item.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.message)
    }
}
