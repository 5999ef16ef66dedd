//! Filter bar: active category and sort order.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders ` Category: <name>   Sort: <label>` at `row`.
///
/// # Parameters
///
/// * `row` - Row position (1-indexed)
/// * `filter` - Category display name and sort label
/// * `theme` - Active color theme
/// * `cols` - Terminal width; the category gets at most half of it
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_filter_bar(row: usize, filter: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" Category: ");
    print!("{}", Theme::fg(&theme.colors.badge_bg));
    print!("{}", truncate(&filter.category, cols / 2));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("   Sort: ");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", filter.sort);
    print!("{}", Theme::reset());
    row + 1
}
