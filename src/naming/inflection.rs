//! Deterministic English inflection heuristics.
//!
//! These are fixed suffix rules, not a dictionary: `pluralize` and
//! `singularize` are not inverses of each other and irregular nouns are not
//! handled. Tests pin exact cases rather than round-trip properties.

/// Collection-style suffixes accepted in place of a plural, in match order.
pub const COLLECTION_SUFFIXES: &[&str] = &["List", "Collection", "Lookup", "ById", "ByKey"];

const SIBILANT_ENDINGS: &[&str] = &["s", "x", "z", "ch", "sh"];

const ES_PLURAL_ENDINGS: &[&str] = &["sses", "shes", "ches", "xes", "zes"];

/// Plural form of `word`.
///
/// - consonant + `y` becomes `ies`
/// - `s`, `x`, `z`, `ch`, `sh` endings take `es`
/// - everything else takes `s`
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if ends_with_consonant_y(word) {
        return format!("{}ies", &word[..word.len() - 1]);
    }

    if SIBILANT_ENDINGS.iter().any(|ending| word.ends_with(ending)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

fn ends_with_consonant_y(word: &str) -> bool {
    let bytes = word.as_bytes();
    if bytes.len() < 2 || bytes[bytes.len() - 1] != b'y' {
        return false;
    }
    let before_y = bytes[bytes.len() - 2].to_ascii_lowercase();
    !matches!(before_y, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Singular base name of a plural or collection-style name.
///
/// At most one collection suffix is removed first (never leaving an empty
/// name), then the remainder is depluralized.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    depluralize(strip_collection_suffix(word))
}

/// Remove the first matching collection suffix, unless that empties the word.
pub fn strip_collection_suffix(word: &str) -> &str {
    COLLECTION_SUFFIXES
        .iter()
        .filter_map(|suffix| word.strip_suffix(suffix))
        .find(|stripped| !stripped.is_empty())
        .unwrap_or(word)
}

fn depluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.ends_with("ies") && word.len() > 4 {
        return format!("{}y", &word[..word.len() - 3]);
    }

    if ES_PLURAL_ENDINGS.iter().any(|ending| lower.ends_with(ending)) {
        return word[..word.len() - 2].to_string();
    }

    if lower.ends_with('s') && !lower.ends_with("ss") && word.len() > 1 {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}
