use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::dom;

/// Exact class signature of a rendered question card.
const CARD_SIGNATURE: &str = "bg-white rounded-lg shadow-lg overflow-hidden border border-gray-200";
/// Tokens a card must carry when the exact signature is not present.
const CARD_TOKENS: [&str; 2] = ["rounded-lg", "shadow-lg"];

static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Signature,
    ClassTokens,
}

pub struct Containers<'a> {
    /// `None` when neither strategy matched anything.
    pub strategy: Option<Strategy>,
    pub elements: Vec<ElementRef<'a>>,
}

/// Question cards in document order. Finding none is a valid result.
pub fn locate(doc: &Html) -> Containers<'_> {
    let exact = by_signature(doc);
    if !exact.is_empty() {
        return Containers {
            strategy: Some(Strategy::Signature),
            elements: exact,
        };
    }

    let loose = by_class_tokens(doc);
    let strategy = if loose.is_empty() {
        None
    } else {
        Some(Strategy::ClassTokens)
    };
    Containers {
        strategy,
        elements: loose,
    }
}

fn by_signature(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&DIV)
        .filter(|div| dom::class_attr(*div) == CARD_SIGNATURE)
        .collect()
}

fn by_class_tokens(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&DIV)
        .filter(|div| {
            CARD_TOKENS
                .iter()
                .all(|token| div.value().classes().any(|c| c == *token))
        })
        .collect()
}
