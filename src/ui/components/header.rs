//! Header renderer: centered title with the product count status line below.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title and status lines; returns the next free row.
///
/// The title uses the theme's optional header background. The status line
/// (`Showing N products out of M total`) is dimmed.
///
/// # Parameters
///
/// * `row` - Row of the title line (1-indexed)
/// * `header` - Title and status text
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns, for centering
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let status_len = header.status.chars().count().min(cols);
    let status_padding = cols.saturating_sub(status_len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(status_padding));
    print!("{}", header.status);
    print!("{}", " ".repeat(cols.saturating_sub(status_padding + status_len)));
    print!("{}", Theme::reset());

    row + 2
}
