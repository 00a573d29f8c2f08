/// True for empty or whitespace-only text.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Returns the value only if it holds something other than whitespace.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !is_blank(s))
}

/// Uppercases the first character if it is a word character.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() || first == '_' => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => s.to_string(),
    }
}
