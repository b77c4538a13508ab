//! Latex normalization for generated text.

/// Collapse every double backslash into a single one.
///
/// Generators frequently return LaTeX with escaped control sequences
/// (`\\frac`, `\\alpha`). Stored text must be usable as LaTeX source as-is.
/// Pairs are replaced left to right without overlap, so four backslashes
/// become two.
pub fn normalize_latex(text: &str) -> String {
    text.replace("\\\\", "\\")
}
