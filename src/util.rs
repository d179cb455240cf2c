// src/util.rs — Shared utility functions

/// Build a preview of `s` capped at `max_chars` characters.
///
/// Appends `...` when the text was actually cut. Counts `char`s, not bytes,
/// so multibyte text never gets split mid-scalar.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}
