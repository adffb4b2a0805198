use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::model::Letter;
use crate::parser::dom;

/// Contiguous class run marking a rendered option card.
const OPTION_CARD_MARKER: &str = "p-4 rounded-lg border";
const TEXT_SIZE_TOKEN: &str = "text-lg";

static LETTER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-D]\.?\s*").unwrap());
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());
static MARKED_SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.leading-none").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

// ── Candidate blocks ──

pub fn candidate_blocks(container: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let carded = by_card_marker(container);
    if !carded.is_empty() {
        return carded;
    }
    by_letter_label(container)
}

pub fn by_card_marker(container: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    container
        .select(&DIV)
        .filter(|div| dom::class_attr(*div).contains(OPTION_CARD_MARKER))
        .collect()
}

/// Blocks whose first span is a letter label. A block labelling several
/// letters wraps the whole option list and is skipped, and a labelled block
/// that encloses another labelled block gives way to the inner one.
pub fn by_letter_label(container: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let labelled: Vec<_> = container
        .select(&DIV)
        .filter(|div| first_span_letter(*div).is_some() && labelled_letters(*div) == 1)
        .collect();
    labelled
        .iter()
        .copied()
        .filter(|outer| {
            !labelled
                .iter()
                .any(|inner| inner.ancestors().any(|a| a.id() == outer.id()))
        })
        .collect()
}

fn first_span_letter(block: ElementRef<'_>) -> Option<Letter> {
    let span = block.select(&SPAN).next()?;
    Letter::parse(dom::text(span).trim())
}

fn labelled_letters(block: ElementRef<'_>) -> usize {
    block
        .select(&SPAN)
        .filter_map(|span| Letter::parse(dom::text(span).trim()))
        .collect::<BTreeSet<_>>()
        .len()
}

// ── Per-block fields ──

pub fn letter(block: ElementRef<'_>) -> Option<Letter> {
    marked_letter(block).or_else(|| any_span_letter(block))
}

fn marked_letter(block: ElementRef<'_>) -> Option<Letter> {
    let span = block.select(&MARKED_SPAN).next()?;
    Letter::parse(dom::text(span).trim())
}

fn any_span_letter(block: ElementRef<'_>) -> Option<Letter> {
    block
        .select(&SPAN)
        .find_map(|span| Letter::parse(dom::text(span).trim()))
}

pub fn text(block: ElementRef<'_>) -> String {
    paragraph_text(block).unwrap_or_else(|| unlabelled_text(block))
}

fn paragraph_text(block: ElementRef<'_>) -> Option<String> {
    block
        .select(&PARAGRAPH)
        .filter(|p| match p.value().attr("class") {
            None => true,
            Some(class) => class.trim().is_empty() || class.contains(TEXT_SIZE_TOKEN),
        })
        .map(|p| dom::text(p).trim().to_string())
        .find(|t| !t.is_empty() && Letter::parse(t).is_none())
}

fn unlabelled_text(block: ElementRef<'_>) -> String {
    let text = dom::text(block);
    LETTER_PREFIX_RE
        .replace(text.trim(), "")
        .trim()
        .to_string()
}
