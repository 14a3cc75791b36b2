/// Trims `value` and returns it unless nothing is left.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Same as [`non_blank`] for optional input.
pub fn optional_non_blank(value: Option<&str>) -> Option<String> {
    value.and_then(non_blank)
}
