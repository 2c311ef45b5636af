//! camelCase conversion for type short names.
//!
//! Names are segmented into word tokens, in priority order:
//! 1. an uppercase run directly followed by an `Xy` pair, a digit or the end
//!    of input (acronym heads such as `URL` in `URLParser`),
//! 2. an optional uppercase letter followed by lowercase letters,
//! 3. a run of digits.
//!
//! Characters that start none of these are skipped. Only ASCII letters and
//! digits take part in segmentation.

/// Convert a type short name to camelCase.
///
/// The first token is lowercased; later tokens are capitalized, except pure
/// digit runs which are kept verbatim. When no token is found the raw input is
/// returned with its first character lowercased.
pub fn to_camel_case(short_name: &str) -> String {
    if short_name.is_empty() {
        return String::new();
    }

    let tokens = split_words(short_name);
    if tokens.is_empty() {
        return lowercase_first(short_name);
    }

    let mut camel = String::with_capacity(short_name.len());
    for (index, token) in tokens.iter().enumerate() {
        let lower = token.to_ascii_lowercase();
        if index == 0 {
            camel.push_str(&lower);
        } else if token.bytes().all(|byte| byte.is_ascii_digit()) {
            camel.push_str(token);
        } else {
            camel.push_str(&capitalize(&lower));
        }
    }
    camel
}

/// Split a name into its word tokens (see module docs for the token rules).
pub fn split_words(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < bytes.len() {
        let matched = match_acronym(bytes, position)
            .or_else(|| match_word(bytes, position))
            .or_else(|| match_digits(bytes, position));

        match matched {
            Some(end) => {
                tokens.push(&name[position..end]);
                position = end;
            }
            None => position += 1,
        }
    }

    tokens
}

/// Uppercase run whose end is followed by `[A-Z][a-z]`, a digit or end of input.
/// The longest run satisfying the lookahead wins.
fn match_acronym(bytes: &[u8], start: usize) -> Option<usize> {
    let run_end = scan_while(bytes, start, u8::is_ascii_uppercase);
    (start + 1..=run_end)
        .rev()
        .find(|&end| acronym_boundary(bytes, end))
}

fn acronym_boundary(bytes: &[u8], end: usize) -> bool {
    match bytes.get(end) {
        None => true,
        Some(byte) if byte.is_ascii_digit() => true,
        Some(byte) if byte.is_ascii_uppercase() => {
            bytes.get(end + 1).is_some_and(u8::is_ascii_lowercase)
        }
        Some(_) => false,
    }
}

/// Optional uppercase letter followed by one or more lowercase letters.
fn match_word(bytes: &[u8], start: usize) -> Option<usize> {
    let lower_start = match bytes.get(start) {
        Some(byte) if byte.is_ascii_uppercase() => start + 1,
        Some(_) => start,
        None => return None,
    };
    let end = scan_while(bytes, lower_start, u8::is_ascii_lowercase);
    (end > lower_start).then_some(end)
}

fn match_digits(bytes: &[u8], start: usize) -> Option<usize> {
    let end = scan_while(bytes, start, u8::is_ascii_digit);
    (end > start).then_some(end)
}

fn scan_while(bytes: &[u8], start: usize, predicate: fn(&u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() && predicate(&bytes[end]) {
        end += 1;
    }
    end
}

/// Uppercase the first character if it is an ASCII letter.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(word.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}

/// Lowercase the first character if it is an ASCII letter.
pub fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut lowered = String::with_capacity(word.len());
            lowered.push(first.to_ascii_lowercase());
            lowered.push_str(chars.as_str());
            lowered
        }
        None => String::new(),
    }
}

/// Split an identifier before every ASCII uppercase letter.
///
/// `nodeMapById` becomes `["node", "Map", "By", "Id"]`. A leading uppercase
/// letter yields an empty first segment, as does an empty identifier.
pub fn split_before_uppercase(identifier: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut segment_start = 0;
    for (index, byte) in identifier.bytes().enumerate() {
        if byte.is_ascii_uppercase() {
            segments.push(&identifier[segment_start..index]);
            segment_start = index;
        }
    }
    segments.push(&identifier[segment_start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_acronym_head_is_one_token() {
        assert_eq!(split_words("URLParserDto"), vec!["URL", "Parser", "Dto"]);
        assert_eq!(to_camel_case("URLParserDto"), "urlParserDto");
    }

    #[test]
    fn test_digits_are_kept_verbatim() {
        assert_eq!(split_words("Node2D"), vec!["Node", "2", "D"]);
        assert_eq!(to_camel_case("Node2D"), "node2D");
        assert_eq!(to_camel_case("Base64Encoder"), "base64Encoder");
    }

    #[test]
    fn test_trailing_acronym() {
        assert_eq!(to_camel_case("HttpAPI"), "httpApi");
        assert_eq!(to_camel_case("ID"), "id");
    }

    #[test]
    fn test_no_tokens_falls_back_to_lowercase_first() {
        assert_eq!(to_camel_case("_"), "_");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_non_letter_characters_are_dropped() {
        assert_eq!(to_camel_case("Legacy_Order"), "legacyOrder");
        assert_eq!(to_camel_case("user"), "user");
    }

    #[test]
    fn test_capitalize_and_lowercase_first() {
        assert_eq!(capitalize("channel"), "Channel");
        assert_eq!(capitalize(""), "");
        assert_eq!(lowercase_first("Channel"), "channel");
    }

    #[test]
    fn test_split_before_uppercase() {
        assert_eq!(split_before_uppercase("nodeMapById"), vec!["node", "Map", "By", "Id"]);
        assert_eq!(split_before_uppercase("Map"), vec!["", "Map"]);
        assert_eq!(split_before_uppercase(""), vec![""]);
    }

    proptest! {
        #[test]
        fn camel_case_never_panics_and_starts_lowercase(name in "[A-Za-z0-9_]{1,24}") {
            let camel = to_camel_case(&name);
            if let Some(first) = camel.chars().next() {
                prop_assert!(!first.is_ascii_uppercase());
            }
        }

        #[test]
        fn camel_case_of_camel_case_is_stable(name in "[A-Z][a-z]{1,8}([A-Z][a-z]{1,8}){0,3}") {
            let once = to_camel_case(&name);
            prop_assert_eq!(to_camel_case(&once), once.clone());
        }
    }
}
