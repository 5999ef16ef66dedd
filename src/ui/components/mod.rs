//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: title and status line
//! - [`filter_bar`]: active category and sort
//! - [`search`]: search input box
//! - [`table`]: product table
//! - [`empty`]: loading and no-results message
//! - [`banner`]: load failure message
//! - [`detail`]: single product panel
//! - [`footer`]: keybinding hints
//!
//! # Layout Modes
//!
//! - [`render_list_mode`]: Header + (`SearchBar`) + `FilterBar` + Table/Empty + Footer
//! - [`render_detail_mode`]: Header + Detail + Footer
//! - [`render_failure_mode`]: Header + Banner + Footer

mod banner;
mod detail;
mod empty;
mod filter_bar;
mod footer;
mod header;
mod search;
pub mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BannerInfo, DetailInfo, UIViewModel};

use banner::render_banner;
use detail::render_detail;
use empty::render_empty_state;
use filter_bar::render_filter_bar;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows, ColumnLayout};

/// Renders a horizontal rule at `row`; returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Header at the top, footer pinned to the last row; returns the first body row.
fn render_chrome(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> usize {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows.saturating_sub(1);
    render_border(footer_start.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    current_row
}

/// Table view, with the search box when searching.
///
/// ```text
/// [blank line]
/// [Header: title]
/// [Header: status]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Filter Bar]
/// [Table Headers]
/// [Table Rows] or [Empty State]
/// [Border]
/// [Footer]
/// ```
pub fn render_list_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_chrome(vm, theme, cols, rows);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_filter_bar(current_row, &vm.filter_bar, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
        return;
    }

    let layout = ColumnLayout::for_width(cols);
    current_row = render_table_headers(current_row, &layout, theme);
    render_table_rows(current_row, &vm.display_items, &layout, theme, cols);
}

/// Detail panel in place of the table.
///
/// The panel starts one row below the header border and is given the rows
/// above the footer.
pub fn render_detail_mode(vm: &UIViewModel, detail: &DetailInfo, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_chrome(vm, theme, cols, rows);
    render_detail(current_row + 1, detail, theme, cols, rows.saturating_sub(3));
}

/// Fixed failure banner; nothing else is shown once a load fails.
///
/// ```text
/// [blank line]
/// [Header: title]
/// [Header: status, empty]
/// [Border]
/// [blank line]
/// [Banner]
/// ...
/// [Border]
/// [Footer: q: quit]
/// ```
pub fn render_failure_mode(vm: &UIViewModel, banner: &BannerInfo, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_chrome(vm, theme, cols, rows);
    render_banner(current_row, banner, theme, cols);
}
