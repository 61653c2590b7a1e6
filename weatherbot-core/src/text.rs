//! Small string helpers shared by the pipeline.

/// Trim leading/trailing whitespace and collapse internal runs of
/// whitespace to single spaces. The tokenizer requires its input in this
/// shape.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
