//! Input tokenizer

/// Splits a line into lower-cased words, dropping surrounding and repeated
/// whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
