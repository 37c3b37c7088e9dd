//! Free-text normalization (names, streets, cities, notes)

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCasing {
    #[default]
    None,
    Lower,
    Upper,
    Title,
}

/// Steps applied by [`normalize_text`]; each one can be switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub trim: bool,
    /// Collapse whitespace runs (spaces, tabs, newlines) into a single space
    pub collapse_whitespace: bool,
    /// Off by default so Czech diacritics survive
    pub remove_diacritics: bool,
    pub casing: TextCasing,
    /// Truncate to this many characters; `None` or 0 disables truncation
    pub max_length: Option<usize>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            trim: true,
            collapse_whitespace: true,
            remove_diacritics: false,
            casing: TextCasing::None,
            max_length: None,
        }
    }
}

impl TextOptions {
    /// Every step disabled
    pub fn none() -> Self {
        Self {
            trim: false,
            collapse_whitespace: false,
            ..Self::default()
        }
    }

    pub fn casing(mut self, casing: TextCasing) -> Self {
        self.casing = casing;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn remove_diacritics(mut self, remove: bool) -> Self {
        self.remove_diacritics = remove;
        self
    }
}

/// Normalize raw input: trim, collapse whitespace, remove diacritics, apply
/// casing, truncate. Absent or empty input yields an empty string.
pub fn normalize_text(raw: Option<&str>, options: &TextOptions) -> String {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };

    let mut result = if options.trim {
        raw.trim().to_string()
    } else {
        raw.to_string()
    };

    if options.collapse_whitespace {
        result = collapse_whitespace(&result);
    }

    if options.remove_diacritics {
        result = remove_diacritics(&result);
    }

    result = apply_casing(&result, options.casing);

    match options.max_length {
        Some(max) if max > 0 => result.chars().take(max).collect(),
        _ => result,
    }
}

fn collapse_whitespace(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_was_whitespace = false;

    for c in value.chars() {
        if c.is_whitespace() {
            if !previous_was_whitespace {
                result.push(' ');
                previous_was_whitespace = true;
            }
        } else {
            result.push(c);
            previous_was_whitespace = false;
        }
    }

    result
}

fn remove_diacritics(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

fn apply_casing(value: &str, casing: TextCasing) -> String {
    match casing {
        TextCasing::None => value.to_string(),
        TextCasing::Lower => value.to_lowercase(),
        TextCasing::Upper => value.to_uppercase(),
        TextCasing::Title => title_case(value),
    }
}

/// Lowercase everything, then uppercase the first letter of every word.
/// An apostrophe does not start a new word ("o'neil" -> "O'neil").
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.push(c);
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = c != '\'' && c != '’';
        }
    }

    result
}
