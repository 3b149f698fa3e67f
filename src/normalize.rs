use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a string for substring comparison: canonical decomposition (NFD),
/// every combining mark removed, then lower-cased.
///
/// Stored fragments and query tokens both go through this function, so a
/// token can only match if it was folded exactly like the stored text.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.to_lowercase()
}
