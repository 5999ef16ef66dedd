//! Error banner shown after a failed load.
//!
//! The message is fixed. The actual cause is only written to the trace log.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BannerInfo;

/// Renders the banner one row below `row`, in the error color.
///
/// # Parameters
///
/// * `row` - First body row (1-indexed); the row itself is left blank
/// * `banner` - Banner message
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns; longer messages are truncated
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_banner(row: usize, banner: &BannerInfo, theme: &Theme, cols: usize) -> usize {
    let message = truncate(&format!(" ✗ {}", banner.message), cols);
    let len = message.chars().count();

    position_cursor(row + 1, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(len)));
    print!("{}", Theme::reset());
    row + 2
}
