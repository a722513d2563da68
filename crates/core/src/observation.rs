//! The shared "what counts as an answer" rule

/// Trim a raw cell; blank and whitespace-only cells are not observations
pub fn observe(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// All observations in a column, in row order
pub fn observed_values<S: AsRef<str>>(values: &[S]) -> impl Iterator<Item = &str> {
    values.iter().filter_map(|v| observe(v.as_ref()))
}
