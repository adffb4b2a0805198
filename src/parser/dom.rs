use scraper::ElementRef;

/// Concatenated text of every descendant text node, untrimmed.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// The class attribute with whitespace runs collapsed to single spaces.
pub fn class_attr(el: ElementRef<'_>) -> String {
    el.value()
        .attr("class")
        .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}
