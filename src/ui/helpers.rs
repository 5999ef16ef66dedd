//! Shared rendering utilities.
//!
//! Widths and highlight ranges are in characters, not bytes.

use crate::ui::theme::Theme;

const ELLIPSIS: char = '…';

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates `text` to `width` characters, marking a cut with `…`.
///
/// # Example
///
/// ```rust
/// use zcatalog::ui::helpers::truncate;
///
/// assert_eq!(truncate("Ceramic mug", 20), "Ceramic mug");
/// assert_eq!(truncate("Ceramic mug", 5), "Cera…");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Right-pads `text` with spaces to `width` characters.
///
/// Text already at least `width` characters long is returned unchanged.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Builds `text` fitted to `width` cells with match ranges highlighted.
///
/// `restore` is the escape sequence re-applied after each highlighted run so
/// the rest of the cell keeps the row's colors. Ranges falling in the
/// truncated tail are dropped.
///
/// # Parameters
///
/// * `text` - Full cell contents
/// * `ranges` - Sorted, non-overlapping `(start, end)` character ranges
/// * `width` - Cell width in characters
/// * `theme` - Supplies the match highlight colors
/// * `restore` - Escape sequence for the surrounding row style
///
/// # Returns
///
/// The styled cell, padded with spaces to exactly `width` visible characters.
#[must_use]
pub fn highlighted_cell(
    text: &str,
    ranges: &[(usize, usize)],
    width: usize,
    theme: &Theme,
    restore: &str,
) -> String {
    let fitted = truncate(text, width);
    let chars: Vec<char> = fitted.chars().collect();
    let truncated = chars.len() < text.chars().count();
    let visible = if truncated { chars.len().saturating_sub(1) } else { chars.len() };

    let mut out = String::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.max(current_pos);
        let end = end.min(visible);
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out.push_str(&" ".repeat(width.saturating_sub(chars.len())));
    out
}

/// Wraps `text` at word boundaries into lines of at most `width` characters.
///
/// Words longer than `width` are split.
///
/// # Example
///
/// ```rust
/// use zcatalog::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("a soft cotton tee", 8), vec!["a soft", "cotton", "tee"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(&word);
        line_len += word.len();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Café au lait", 5), "Café…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn cell_without_ranges_is_padded_text() {
        let theme = Theme::default();
        assert_eq!(highlighted_cell("Mug", &[], 6, &theme, ""), "Mug   ");
    }

    #[test]
    fn cell_wraps_matches_in_highlight_colors() {
        let theme = Theme::default();
        let out = highlighted_cell("Red Shirt", &[(4, 9)], 9, &theme, "");
        let highlight = format!(
            "{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg)
        );
        assert_eq!(out, format!("Red {highlight}Shirt{}", Theme::reset()));
    }

    #[test]
    fn ranges_in_truncated_tail_are_dropped() {
        let theme = Theme::default();
        let out = highlighted_cell("Blue Mug", &[(5, 8)], 5, &theme, "");
        assert_eq!(out, "Blue…");
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
        assert!(wrap_text("", 10).is_empty());
    }
}
