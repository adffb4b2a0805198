use crate::config::QuizMeta;
use crate::model::{QuestionRecord, QuizDocument};

use super::extract::ExtractedFields;

/// Numbers questions 1.. in the order given.
pub fn number_questions(fields: Vec<ExtractedFields>) -> Vec<QuestionRecord> {
    fields
        .into_iter()
        .enumerate()
        .map(|(i, f)| QuestionRecord {
            id: i + 1,
            question: f.question,
            options: f.options,
            correct_answer: f.correct_answer,
        })
        .collect()
}

pub fn build_document(questions: Vec<QuestionRecord>, meta: &QuizMeta) -> QuizDocument {
    QuizDocument {
        quiz_title: meta.title.clone(),
        description: meta.description.clone(),
        total_questions: questions.len(),
        questions_per_quiz: meta.questions_per_quiz,
        questions,
    }
}
