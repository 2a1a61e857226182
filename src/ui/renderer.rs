//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: compute the view model from `AppState`,
//! then hand it to the component layout. Output goes to stdout as ANSI
//! sequences with explicit cursor positioning.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
