//! UI utility functions for text processing and layout management.
//!
//! This module provides helper functions for truncating text, terminal size
//! validation, and the layout of the main screen.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Minimum terminal dimensions
pub const MIN_TERMINAL_WIDTH: u16 = 60;
pub const MIN_TERMINAL_HEIGHT: u16 = 20;

/// Validates that the terminal meets minimum size requirements
///
/// # Returns
/// Returns `Ok(())` if terminal is large enough, or an error message if too small
pub fn validate_terminal_size(width: u16, height: u16) -> Result<(), String> {
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        Err(format!(
            "Terminal too small! Minimum size: {MIN_TERMINAL_WIDTH}x{MIN_TERMINAL_HEIGHT}, Current: {width}x{height}"
        ))
    } else {
        Ok(())
    }
}

/// Truncates text to fit within a maximum width, adding an ellipsis if needed
///
/// Widths are terminal columns: wide characters such as CJK count twice.
///
/// # Examples
/// ```
/// use spin_wheel::ui::utils::truncate_text;
///
/// assert_eq!(truncate_text("Hello, World!", 10), "Hello, Wo…");
/// assert_eq!(truncate_text("Short", 10), "Short");
/// ```
pub fn truncate_text(text: &str, max_width: usize) -> String {
    crate::wheel::truncate_label(text, max_width)
}

/// Creates a centered area within a parent area
///
/// # Returns
/// A centered Rect within the parent, clamped to the parent's size
pub fn centered_rect(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);

    Rect {
        x: parent.x + (parent.width.saturating_sub(width)) / 2,
        y: parent.y + (parent.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Splits the content area into the wheel pane and the list panel.
///
/// The wheel takes two thirds of the width on wide terminals; narrow terminals
/// stack the list under the wheel instead.
///
/// # Returns
/// Tuple of (wheel, panel) Rect areas
pub fn wheel_panel_layout(area: Rect) -> (Rect, Rect) {
    let chunks = if area.width >= 100 {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area)
    };

    (chunks[0], chunks[1])
}
