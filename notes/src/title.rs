//! Note title handling.

/// Characters that are never allowed in a note file name.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '"', '*', '?', '<', '>', '|'];

/// Validation message for blank titles.
pub const TITLE_REQUIRED: &str = "Title is required";

/// Turn a user-supplied title into a safe file stem.
///
/// Path separators and other reserved characters are removed, whitespace
/// runs collapse to a single space and the result is trimmed.
pub fn sanitize_title(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Input validator for title prompts: an error message, or `None` if valid.
pub fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        Some(TITLE_REQUIRED.to_string())
    } else {
        None
    }
}
