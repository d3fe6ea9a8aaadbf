//! Reusable UI widgets for the Spin Wheel.
//!
//! This module provides the winner dialog and the spin progress gauge.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;
use super::utils::{centered_rect, truncate_text};

/// Renders the "And the winner is..." dialog with its three actions.
///
/// # Arguments
/// * `f` - The ratatui Frame to render into
/// * `winner` - Winning label
/// * `duplicated` - Whether the label appears more than once in the list
/// * `theme` - Theme for colors
pub fn render_winner_dialog(f: &mut Frame, winner: &str, duplicated: bool, theme: &Theme) {
    let screen = f.area();
    let width = 56.min(screen.width.saturating_sub(4));
    let area = centered_rect(screen, width, 11);

    f.render_widget(Clear, area);

    let name_width = usize::from(area.width.saturating_sub(4));
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "And the winner is...",
            Style::default().fg(theme.foreground()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate_text(winner, name_width),
            Style::default()
                .fg(theme.success())
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if duplicated {
        lines.push(Line::from(Span::styled(
            "(listed more than once)",
            Style::default().fg(theme.muted()),
        )));
    }

    let body = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Winner ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary()))
            .style(Style::default().bg(theme.background())),
    );
    f.render_widget(body, area);

    let button_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(3),
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let button_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(button_area);

    let buttons = [
        ("[Enter] Close", theme.primary()),
        ("[r] Remove", theme.warning()),
        ("[a] Remove All", theme.error()),
    ];
    for ((label, color), chunk) in buttons.into_iter().zip(button_chunks.iter()) {
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(button, *chunk);
    }
}

/// Builds the text of a one-line progress bar `width` cells wide.
///
/// `progress` is clamped to `[0, 1]`.
pub fn progress_bar(progress: f64, width: usize) -> (String, String) {
    let progress = progress.clamp(0.0, 1.0);
    let filled = ((width as f64) * progress).round() as usize;
    ("█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

/// Renders the spin progress gauge
///
/// # Arguments
/// * `f` - The ratatui Frame to render into
/// * `area` - Area to render the gauge into (one line is used)
/// * `progress` - Progress value (0.0 to 1.0)
/// * `theme` - Theme for colors
pub fn render_spin_progress(f: &mut Frame, area: Rect, progress: f64, theme: &Theme) {
    let percentage = (progress.clamp(0.0, 1.0) * 100.0) as u16;
    let label = format!(" {percentage:>3}%");
    let bar_width = usize::from(area.width).saturating_sub(label.len());
    let (filled, empty) = progress_bar(progress, bar_width);

    let line = Line::from(vec![
        Span::styled(filled, Style::default().fg(theme.success())),
        Span::styled(empty, Style::default().fg(theme.muted())),
        Span::styled(
            label,
            Style::default()
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
