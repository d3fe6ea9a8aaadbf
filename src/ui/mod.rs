//! UI module for Spin Wheel.
//!
//! This module contains all UI-related functionality including:
//! - Theme system with dark and light palettes
//! - The winner dialog and spin progress gauge
//! - Text and layout helpers
//! - Main rendering functions

pub mod render;
pub mod theme;
pub mod utils;
pub mod widgets;

// Re-export commonly used items
pub use render::draw;
pub use theme::{Theme, ThemeColors, ThemePreset};
pub use utils::{
    centered_rect, truncate_text, validate_terminal_size, wheel_panel_layout,
    MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH,
};
pub use widgets::{progress_bar, render_spin_progress, render_winner_dialog};
