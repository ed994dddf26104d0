/// If `label` occurs in `text`, drop everything up to and including the
/// first occurrence and return the remainder. Otherwise return `text`
/// unchanged. Used to peel fixed prefixes like `"Description "` and
/// `"Home "` off crawl fields.
pub fn strip_leading_label<'a>(text: &'a str, label: &str) -> &'a str {
    match text.find(label) {
        Some(pos) => &text[pos + label.len()..],
        None => text,
    }
}

/// Parse a currency string like `"$1,299.00"` into a number.
///
/// Price is best-effort: anything that does not parse to a finite,
/// non-negative number comes back as exactly 0.0. This is the one lenient
/// path in the pipeline; a bad price never fails a row.
pub fn parse_currency(text: &str, symbol: &str) -> f64 {
    let remainder = strip_leading_label(text, symbol);
    let cleaned = remainder.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => price,
        _ => 0.0,
    }
}
