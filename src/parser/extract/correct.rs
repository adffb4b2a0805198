use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::model::{Letter, OptionRecord};
use crate::parser::dom;

const GREEN: &str = "green";
/// Literal "correct answer" label some pages print next to the answer.
pub const CORRECT_ANSWER_MARKER: &str = "正确答案";

static ICON: LazyLock<Selector> = LazyLock::new(|| Selector::parse("svg").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static GREEN_FONT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"font[color="green"]"#).unwrap());

/// Any one signal suffices. Every icon counts, including ones that are
/// not check marks.
pub fn is_marked_correct(block: ElementRef<'_>) -> bool {
    has_green_class(block) || has_icon(block) || has_green_paragraph(block)
}

fn has_green_class(block: ElementRef<'_>) -> bool {
    block
        .value()
        .classes()
        .any(|c| c.to_lowercase().contains(GREEN))
}

fn has_icon(block: ElementRef<'_>) -> bool {
    block.select(&ICON).next().is_some()
}

fn has_green_paragraph(block: ElementRef<'_>) -> bool {
    block
        .select(&PARAGRAPH)
        .any(|p| p.value().attr("class").is_some_and(|c| c.contains(GREEN)))
}

/// Second pass for when no block carried a signal: find an option whose
/// text sits in a block with a green font or the answer label. Marks the
/// first such option and returns its letter. Options with empty text never
/// match, since an empty needle is contained in every block.
pub fn repair(options: &mut [OptionRecord], blocks: &[ElementRef<'_>]) -> Option<Letter> {
    for option in options.iter_mut() {
        if option.text.is_empty() {
            continue;
        }
        let needle = option.text.to_lowercase();
        let confirmed = blocks.iter().any(|block| {
            let text = dom::text(*block);
            text.to_lowercase().contains(&needle)
                && (block.select(&GREEN_FONT).next().is_some()
                    || text.contains(CORRECT_ANSWER_MARKER))
        });
        if confirmed {
            option.is_correct = true;
            return Some(option.letter);
        }
    }
    None
}
