//! Query and content normalization
//!
//! Normalized text is lower-case, holds only letters, digits and single
//! spaces, and has no leading or trailing whitespace. Empty or
//! whitespace-only input normalizes to `""` and tokenizes to an empty
//! sequence.

/// Lower-case, replace non-alphanumerics with spaces, collapse whitespace
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Whether `phrase` appears in `text` as whole words, after normalizing both
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let phrase = normalize(phrase);
    if phrase.is_empty() {
        return false;
    }
    format!(" {} ", normalize(text)).contains(&format!(" {phrase} "))
}

/// Split normalized text into tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split content on sentence-terminal punctuation, dropping blank pieces
pub fn split_sentences(content: &str) -> Vec<&str> {
    content
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
