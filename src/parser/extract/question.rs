use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::parser::dom;

static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+").unwrap());
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

/// Question text from the first heading; the numbered-line scan only runs
/// when the container has no heading at all.
pub fn question_text(container: ElementRef<'_>) -> Option<String> {
    match container.select(&HEADING).next() {
        Some(heading) => from_heading(heading),
        None => from_numbered_line(container),
    }
}

pub fn from_heading(heading: ElementRef<'_>) -> Option<String> {
    non_empty(strip_number(&dom::text(heading)))
}

pub fn from_numbered_line(container: ElementRef<'_>) -> Option<String> {
    let text = dom::text(container);
    let line = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .find(|l| NUMBER_PREFIX_RE.is_match(l) && l.chars().count() > 1)?;
    non_empty(strip_number(line))
}

/// Drops the leading digits only; "1. Foo" keeps its period.
pub fn strip_number(s: &str) -> String {
    NUMBER_PREFIX_RE.replace(s.trim(), "").trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
