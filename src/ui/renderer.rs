//! Top-level rendering coordinator.
//!
//! Computes the view model from `AppState` and hands it to the layout that
//! matches its contents: failure banner, detail panel, or the table.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(banner) = &vm.banner {
        components::render_failure_mode(vm, banner, theme, cols, rows);
    } else if let Some(detail) = &vm.detail {
        components::render_detail_mode(vm, detail, theme, cols, rows);
    } else {
        components::render_list_mode(vm, theme, cols, rows);
    }
}
