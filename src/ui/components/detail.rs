//! Product detail panel.
//!
//! ```text
//!  Product Details
//!  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//!  Name:           Red Shirt
//!  Price:          $10.00
//!  Category:       Clothing
//!  Category slug:  clothing
//!  ID:             1
//!  Created:        1/15/2024
//!  Updated:        2/1/2024
//!  Images:         https://...
//!
//!  Description:
//!    Soft cotton tee ...
//! ```
//!
//! Optional fields (category id, slug and image, update date) only get a
//! line when present. Lines that would run past `last_row` are dropped.

use crate::ui::helpers::{position_cursor, truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 16;
const INDENT: usize = 1;

/// Line-by-line writer that stops at the bottom of the panel.
struct Panel<'a> {
    /// Next row to draw on (1-indexed).
    row: usize,
    /// Last row the panel may use.
    last_row: usize,
    cols: usize,
    theme: &'a Theme,
}

impl Panel<'_> {
    /// Writes one line and pads it to the pane width.
    ///
    /// `visible_len` is the printable width of `styled`, excluding escapes.
    fn line(&mut self, styled: &str, visible_len: usize) {
        if self.row > self.last_row {
            return;
        }
        position_cursor(self.row, 1);
        print!("{}", " ".repeat(INDENT));
        print!("{styled}");
        print!("{}", Theme::reset());
        print!("{}", " ".repeat(self.cols.saturating_sub(INDENT + visible_len)));
        self.row += 1;
    }

    /// Writes a `label` padded to `LABEL_WIDTH`, then `value` in `color`.
    fn field(&mut self, label: &str, value: &str, color: &str) {
        let width = self.cols.saturating_sub(INDENT + LABEL_WIDTH);
        let value = truncate(value, width);
        let visible = LABEL_WIDTH + value.chars().count();
        let styled = format!(
            "{}{:<LABEL_WIDTH$}{}{value}",
            Theme::fg(&self.theme.colors.text_dim),
            label,
            Theme::fg(color),
        );
        self.line(&styled, visible);
    }

    fn optional_field(&mut self, label: &str, value: Option<&str>, color: &str) {
        if let Some(value) = value {
            self.field(label, value, color);
        }
    }

    fn blank(&mut self) {
        self.line("", 0);
    }
}

/// Renders the panel from `row` to at most `last_row`; returns the next free row.
///
/// # Parameters
///
/// * `row` - First row of the panel (1-indexed)
/// * `detail` - Fields of the product being inspected
/// * `theme` - Active color theme
/// * `cols` - Terminal width; values are truncated and the description wrapped
/// * `last_row` - Last row available above the footer
///
/// # Returns
///
/// The row after the last line drawn, at most `last_row + 1`.
pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut panel = Panel {
        row,
        last_row,
        cols,
        theme,
    };
    let rule_len = cols.saturating_sub(INDENT * 2).min(32);

    panel.line(
        &format!("{}{}Product Details", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
        "Product Details".len(),
    );
    panel.line(
        &format!("{}{}", Theme::fg(&theme.colors.border), "━".repeat(rule_len)),
        rule_len,
    );

    let normal = &theme.colors.text_normal;
    panel.field("Name:", &detail.title, normal);
    panel.field("Price:", &detail.price, &theme.colors.price_fg);
    panel.field("Category:", &detail.category, &theme.colors.badge_bg);
    panel.optional_field("Category ID:", detail.category_id.as_deref(), normal);
    panel.optional_field("Category slug:", detail.category_slug.as_deref(), normal);
    panel.optional_field("Category image:", detail.category_image.as_deref(), &theme.colors.text_dim);
    panel.field("ID:", &detail.id, normal);
    panel.field("Created:", &detail.created, normal);
    panel.optional_field("Updated:", detail.updated.as_deref(), normal);
    for (i, image) in detail.images.iter().enumerate() {
        let label = if i == 0 { "Images:" } else { "" };
        panel.field(label, image, &theme.colors.text_dim);
    }

    panel.blank();
    panel.line(
        &format!("{}Description:", Theme::fg(&theme.colors.text_dim)),
        "Description:".len(),
    );
    for text in wrap_text(&detail.description, cols.saturating_sub(INDENT + 4)) {
        let visible = 2 + text.chars().count();
        panel.line(&format!("{}  {text}", Theme::fg(normal)), visible);
    }

    panel.row
}
