use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is a valid regex"));

/// Turns a display label into a URL path segment.
///
/// `"Mt. O'Brien & Sons"` becomes `"mt-obrien-and-sons"`. Accented letters
/// keep their base letter, anything else outside `[a-z0-9]` collapses into
/// single hyphens. The result is stable under re-application.
pub fn slugify(label: &str) -> String {
    let folded: String = label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .replace('&', " and ")
        .replace(['\'', '\u{2019}'], "")
        .to_lowercase();

    NON_SLUG_RUN
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

pub fn slugify_opt(label: Option<&str>) -> String {
    label.map(slugify).unwrap_or_default()
}
