//! Product table renderer.
//!
//! Seven columns: IMAGE, TITLE, CATEGORY, DESCRIPTION, PRICE, ID and ACTION.
//! DESCRIPTION absorbs the width left over by the fixed columns; IMAGE is
//! dropped on narrow panes.
//!
//! ```text
//! IMAGE                TITLE                    CATEGORY         DESCRIPTION ...  PRICE         ID     ACTION
//! https://i.imgur...   Red Shirt                 Clothing        Soft cotton ...  $10.00        #1     View
//! ```
//!
//! Search matches in TITLE and DESCRIPTION are highlighted. The selected row
//! is drawn with the selection colors across the full pane width.

use crate::ui::helpers::{highlighted_cell, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MIN_DESCRIPTION_WIDTH: usize = 12;

/// Column widths in characters. A zero width hides the column.
///
/// Columns are separated by one space, which is not part of any width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Truncated first image URL. Zero when the pane is too narrow.
    pub image: usize,

    /// Product title, with search highlighting.
    pub title: usize,

    /// Category badge, including its one-space padding on each side.
    pub category: usize,

    /// Description preview. Takes the remaining width, never less than
    /// `MIN_DESCRIPTION_WIDTH`.
    pub description: usize,

    /// Formatted price, e.g. `$1,234.50`.
    pub price: usize,

    /// Product id with a leading `#`.
    pub id: usize,

    /// The static `View` action label.
    pub action: usize,
}

impl ColumnLayout {
    /// Computes column widths for a pane `cols` characters wide.
    ///
    /// # Parameters
    ///
    /// * `cols` - Terminal width in columns
    ///
    /// # Returns
    ///
    /// A layout whose columns fill `cols` exactly when the pane is wide
    /// enough. Narrower panes first lose IMAGE, then overflow on the right.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zcatalog::ui::components::table::ColumnLayout;
    ///
    /// assert_eq!(ColumnLayout::for_width(200).image, 20);
    /// assert_eq!(ColumnLayout::for_width(80).image, 0);
    /// ```
    #[must_use]
    pub fn for_width(cols: usize) -> Self {
        let mut layout = Self {
            image: 20,
            title: 24,
            category: 16,
            description: 0,
            price: 13,
            id: 6,
            action: 6,
        };

        if cols < layout.fixed_width() + MIN_DESCRIPTION_WIDTH {
            layout.image = 0;
        }
        layout.description = cols
            .saturating_sub(layout.fixed_width())
            .max(MIN_DESCRIPTION_WIDTH);
        layout
    }

    /// Width of every column but DESCRIPTION, plus one separator per column.
    const fn fixed_width(&self) -> usize {
        let image = if self.image == 0 { 0 } else { self.image + 1 };
        image + self.title + self.category + self.price + self.id + self.action + 5
    }
}

/// Renders the column headings at the specified row.
///
/// # Parameters
///
/// * `row` - Row position to render the headings (1-indexed)
/// * `layout` - Column widths for the current pane
/// * `theme` - Active color theme
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, layout: &ColumnLayout, theme: &Theme) -> usize {
    let mut line = String::new();
    if layout.image > 0 {
        line.push_str(&pad("IMAGE", layout.image));
        line.push(' ');
    }
    for (label, width) in [
        ("TITLE", layout.title),
        ("CATEGORY", layout.category),
        ("DESCRIPTION", layout.description),
        ("PRICE", layout.price),
        ("ID", layout.id),
    ] {
        line.push_str(&pad(label, width));
        line.push(' ');
    }
    line.push_str(&pad("ACTION", layout.action));

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{line}");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Parameters
///
/// * `row` - Starting row position for the table (1-indexed)
/// * `items` - Visible window of display items
/// * `layout` - Column widths for the current pane
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding the selected row)
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(
    row: usize,
    items: &[DisplayItem],
    layout: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        position_cursor(current_row, 1);
        print!("{}", format_row(item, layout, theme, cols));
        current_row += 1;
    }
    current_row
}

fn format_row(item: &DisplayItem, layout: &ColumnLayout, theme: &Theme, cols: usize) -> String {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    // Accent colors only apply on unselected rows.
    let accent = |color: &str| {
        if item.is_selected {
            String::new()
        } else {
            Theme::fg(color)
        }
    };

    let mut line = base.clone();

    if layout.image > 0 {
        line.push_str(&accent(&theme.colors.text_dim));
        line.push_str(&pad(&truncate(&item.image, layout.image), layout.image));
        line.push_str(&base);
        line.push(' ');
    }

    line.push_str(&highlighted_cell(&item.title, &item.title_ranges, layout.title, theme, &base));
    line.push(' ');

    let badge = format!(" {} ", truncate(&item.category, layout.category.saturating_sub(2)));
    if !item.is_selected {
        line.push_str(&Theme::fg(&theme.colors.badge_fg));
        line.push_str(&Theme::bg(&theme.colors.badge_bg));
    }
    line.push_str(&badge);
    line.push_str(Theme::reset());
    line.push_str(&base);
    line.push_str(&" ".repeat(layout.category.saturating_sub(badge.chars().count())));
    line.push(' ');

    line.push_str(&accent(&theme.colors.text_dim));
    line.push_str(&highlighted_cell(
        &item.description,
        &item.description_ranges,
        layout.description,
        theme,
        &format!("{base}{}", accent(&theme.colors.text_dim)),
    ));
    line.push_str(&base);
    line.push(' ');

    line.push_str(&accent(&theme.colors.price_fg));
    line.push_str(&pad(&truncate(&item.price, layout.price), layout.price));
    line.push_str(&base);
    line.push(' ');

    line.push_str(&accent(&theme.colors.text_dim));
    line.push_str(&pad(&truncate(&item.id, layout.id), layout.id));
    line.push_str(&base);
    line.push(' ');

    line.push_str(&accent(&theme.colors.search_bar_border));
    line.push_str(&pad(&item.action, layout.action));
    line.push_str(&base);

    let used = layout.fixed_width() + layout.description;
    line.push_str(&" ".repeat(cols.saturating_sub(used)));
    line.push_str(Theme::reset());
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_panes_show_every_column() {
        let layout = ColumnLayout::for_width(140);
        assert_eq!(layout.image, 20);
        assert_eq!(layout.fixed_width() + layout.description, 140);
    }

    #[test]
    fn narrow_panes_drop_the_image_column() {
        let layout = ColumnLayout::for_width(90);
        assert_eq!(layout.image, 0);
        assert_eq!(layout.description, 90 - layout.fixed_width());
    }

    #[test]
    fn description_never_collapses() {
        assert_eq!(ColumnLayout::for_width(20).description, MIN_DESCRIPTION_WIDTH);
    }
}
