pub mod assemble;
pub mod containers;
pub mod dom;
pub mod extract;

use scraper::Html;
use tracing::debug;

use crate::model::{Diagnostic, QuestionRecord};
use containers::Strategy;

pub struct Extraction {
    pub strategy: Option<Strategy>,
    pub containers: usize,
    pub questions: Vec<QuestionRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Markup → question cards → fields → numbered records. A card that fails
/// is recorded in `diagnostics` and its siblings are still processed.
pub fn extract_questions(html: &str) -> Extraction {
    let doc = Html::parse_document(html);
    let found = containers::locate(&doc);

    let mut fields = Vec::with_capacity(found.elements.len());
    let mut diagnostics = Vec::new();

    for (i, container) in found.elements.iter().enumerate() {
        match extract::extract_container(*container) {
            Ok(f) => {
                debug!(
                    container = i + 1,
                    options = f.options.len(),
                    "extracted: {}",
                    crate::truncate(&f.question, 30)
                );
                fields.push(f);
            }
            Err(e) => diagnostics.push(Diagnostic::new(format!("container {}", i + 1), format!("{:#}", e))),
        }
    }

    Extraction {
        strategy: found.strategy,
        containers: found.elements.len(),
        questions: assemble::number_questions(fields),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Letter;

    fn parse(fixture: &str) -> Extraction {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        extract_questions(&html)
    }

    fn assert_well_formed(questions: &[QuestionRecord]) {
        for q in questions {
            let letters: Vec<_> = q.options.iter().map(|o| o.letter).collect();
            let mut sorted = letters.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(letters, sorted, "question {} options not sorted/unique", q.id);
        }
    }

    #[test]
    fn card_fixture() {
        let ex = parse("quiz_cards");
        assert_eq!(ex.strategy, Some(Strategy::Signature));
        assert_eq!(ex.containers, 5);
        assert_eq!(ex.questions.len(), 4);
        assert_well_formed(&ex.questions);

        let ids: Vec<_> = ex.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(ex.diagnostics.len(), 1);
        assert_eq!(ex.diagnostics[0].item, "container 4");
    }

    #[test]
    fn card_fixture_green_class() {
        let q = &parse("quiz_cards").questions[0];
        assert_eq!(q.question, "What is gravity?");
        assert_eq!(q.correct_answer, Some(Letter::B));
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.options[1].text, "A force of attraction between masses");
        assert!(q.options[1].is_correct);
    }

    #[test]
    fn card_fixture_icon_and_unsorted_source() {
        let q = &parse("quiz_cards").questions[1];
        assert_eq!(
            q.question,
            "How fast does an object accelerate in free fall near Earth?"
        );
        let texts: Vec<_> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["4.9 m/s²", "9.8 m/s²", "12 m/s²", "1.6 m/s²"]);
        assert_eq!(q.correct_answer, Some(Letter::B));
    }

    #[test]
    fn card_fixture_repaired_answer() {
        let q = &parse("quiz_cards").questions[2];
        assert_eq!(q.correct_answer, Some(Letter::C));
        assert_eq!(q.options[2].text, "Isaac Newton");
        assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);
    }

    #[test]
    fn card_fixture_unanswered() {
        let q = &parse("quiz_cards").questions[3];
        assert_eq!(q.question, ". Which unit measures force?");
        assert_eq!(q.options.len(), 4);
        assert!(q.correct_answer.is_none());
        assert!(q.options.iter().all(|o| !o.is_correct));
    }

    #[test]
    fn fallback_fixture() {
        let ex = parse("quiz_fallback");
        assert_eq!(ex.strategy, Some(Strategy::ClassTokens));
        assert!(ex.diagnostics.is_empty());
        assert_eq!(ex.questions.len(), 2);
        assert_well_formed(&ex.questions);

        let q1 = &ex.questions[0];
        assert_eq!(q1.question, "Which particle carries a negative charge?");
        let texts: Vec<_> = q1.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Proton", "Electron", "Neutron", "Photon"]);
        assert_eq!(q1.correct_answer, Some(Letter::B));

        let q2 = &ex.questions[1];
        assert_eq!(q2.question, "What is the SI unit of electric current?");
        assert_eq!(q2.options[0].text, "Ampere");
        assert_eq!(q2.correct_answer, Some(Letter::A));
    }

    #[test]
    fn no_questions_fixture() {
        let ex = parse("no_questions");
        assert!(ex.strategy.is_none());
        assert_eq!(ex.containers, 0);
        assert!(ex.questions.is_empty());
        assert!(ex.diagnostics.is_empty());
    }
}
