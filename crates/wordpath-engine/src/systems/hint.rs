//! Sentence display helpers for the presentation layer.

/// Letters of the live selection, truncated to `target_len` and padded
/// with `pad` up to `target_len`.
pub fn progress_fill(letters: &str, target_len: usize, pad: char) -> String {
    let mut fill: String = letters.chars().take(target_len).collect();
    let used = fill.chars().count();
    fill.extend(std::iter::repeat(pad).take(target_len - used));
    fill
}

/// Replace the first occurrence of `marker` in `template` with `fill`.
/// Templates without the marker are returned unchanged.
pub fn fill_blank(template: &str, marker: &str, fill: &str) -> String {
    if marker.is_empty() {
        return template.to_string();
    }
    template.replacen(marker, fill, 1)
}
