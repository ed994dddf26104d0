use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::ParseError;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Pull the crumb trail out of a breadcrumb markup fragment.
///
/// Collects the text of every anchor in document order, then drops the
/// first one: a well-formed trail always starts with the root "Home" link.
/// A fragment with no anchors at all violates that contract and fails the
/// row rather than guessing.
pub fn extract(input: &str) -> Result<Vec<String>, ParseError> {
    let fragment = Html::parse_fragment(input);
    let mut crumbs: Vec<String> = fragment
        .select(&ANCHOR)
        .map(|a| a.text().collect::<String>())
        .collect();

    if crumbs.is_empty() {
        return Err(ParseError::EmptyCrumbTrail);
    }
    crumbs.remove(0);
    Ok(crumbs)
}
