pub mod correct;
pub mod options;
pub mod question;

use anyhow::{Context, Result};
use scraper::ElementRef;

use crate::model::{Letter, OptionRecord};

/// Fields recovered from one question card, options already sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub question: String,
    pub options: Vec<OptionRecord>,
    pub correct_answer: Option<Letter>,
}

pub fn extract_container(container: ElementRef<'_>) -> Result<ExtractedFields> {
    let question = question::question_text(container).context("no question text found")?;

    let blocks = options::candidate_blocks(container);
    let mut recovered: Vec<OptionRecord> = Vec::with_capacity(4);
    let mut correct_answer = None;

    for block in &blocks {
        let Some(letter) = options::letter(*block) else {
            continue;
        };
        if recovered.iter().any(|o| o.letter == letter) {
            continue;
        }
        let is_correct = correct::is_marked_correct(*block);
        if is_correct {
            correct_answer = Some(letter);
        }
        recovered.push(OptionRecord {
            letter,
            text: options::text(*block),
            is_correct,
        });
    }

    if correct_answer.is_none() && !recovered.is_empty() {
        correct_answer = correct::repair(&mut recovered, &blocks);
    }

    recovered.sort_by_key(|o| o.letter);

    Ok(ExtractedFields {
        question,
        options: recovered,
        correct_answer,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn extract(body: &str) -> Result<ExtractedFields> {
        let doc = Html::parse_document(&format!(r#"<div id="q">{}</div>"#, body));
        let sel = Selector::parse("#q").unwrap();
        extract_container(doc.select(&sel).next().unwrap())
    }

    fn card(letter: &str, text: &str, extra_class: &str) -> String {
        format!(
            r#"<div class="p-4 rounded-lg border {}"><span class="leading-none">{}</span><p class="text-lg">{}</p></div>"#,
            extra_class, letter, text
        )
    }

    #[test]
    fn gravity_card() {
        let body = format!(
            "<h3>1 What is gravity?</h3>{}{}{}{}",
            card("A", "A repelling force", "border-gray-200"),
            card("B", "An attracting force", "border-green-500"),
            card("C", "A kind of light", "border-gray-200"),
            card("D", "A chemical bond", "border-gray-200"),
        );
        let f = extract(&body).unwrap();
        assert_eq!(f.question, "What is gravity?");
        assert_eq!(f.correct_answer, Some(Letter::B));
        let letters: Vec<_> = f.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec![Letter::A, Letter::B, Letter::C, Letter::D]);
        assert!(f.options[1].is_correct);
        assert_eq!(f.options.iter().filter(|o| o.is_correct).count(), 1);
    }

    #[test]
    fn period_after_number_is_kept() {
        let body = format!(
            "<h3>1. What is gravity?</h3>{}{}",
            card("A", "Push", ""),
            card("B", "Pull", "bg-green-50"),
        );
        let f = extract(&body).unwrap();
        assert_eq!(f.question, ". What is gravity?");
        assert_eq!(f.correct_answer, Some(Letter::B));
    }

    #[test]
    fn options_sorted_and_unique() {
        let body = format!(
            "<h3>2 Pick one</h3>{}{}{}{}",
            card("C", "third", ""),
            card("A", "first", ""),
            card("C", "duplicate", "bg-green-50"),
            card("B", "second", ""),
        );
        let f = extract(&body).unwrap();
        let letters: Vec<_> = f.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec![Letter::A, Letter::B, Letter::C]);
        assert_eq!(f.options[2].text, "third");
        assert_eq!(f.correct_answer, None);
    }

    #[test]
    fn last_flagged_option_wins() {
        let body = format!(
            "<h3>3 Two flagged</h3>{}{}",
            card("B", "bee", "bg-green-50"),
            card("A", "ay", "bg-green-50"),
        );
        let f = extract(&body).unwrap();
        assert_eq!(f.correct_answer, Some(Letter::A));
    }

    #[test]
    fn unlettered_candidates_are_dropped() {
        let body = format!(
            r#"<h3>4 Q</h3>{}<div class="p-4 rounded-lg border"><p>no label</p></div>"#,
            card("A", "only", ""),
        );
        let f = extract(&body).unwrap();
        assert_eq!(f.options.len(), 1);
    }

    #[test]
    fn question_without_options() {
        let f = extract("<h3>5 Lonely question</h3><p>nothing to choose</p>").unwrap();
        assert_eq!(f.question, "Lonely question");
        assert!(f.options.is_empty());
        assert!(f.correct_answer.is_none());
    }

    #[test]
    fn digits_only_heading_skips_container() {
        let body = format!(
            "<h3>3</h3>\n<div>3 What is work?</div>{}",
            card("A", "Force times distance", "bg-green-50"),
        );
        let err = extract(&body).unwrap_err();
        assert!(err.to_string().contains("no question text"));
    }

    #[test]
    fn missing_question_text_is_an_error() {
        let err = extract("<p>Advertisement</p>").unwrap_err();
        assert!(err.to_string().contains("no question text"));
    }
}
