//! Terminal user interface rendering module.
//!
//! This module contains all UI rendering logic using the ratatui framework.
//! The screen is split into a header, the wheel, the entries/results panel and
//! a footer, with the help screen and winner dialog drawn on top.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use std::time::Instant;

use crate::app::{App, ModalState, Tab};
use crate::wheel::render_wheel;

use super::utils::{truncate_text, validate_terminal_size, wheel_panel_layout};
use super::widgets::{render_spin_progress, render_winner_dialog};

/// Main rendering function that draws the entire UI.
///
/// # Arguments
/// * `f` - The ratatui Frame to render into
/// * `app` - The application state containing data to display
pub fn draw(f: &mut Frame, app: &App) {
    let screen = f.area();
    if let Err(message) = validate_terminal_size(screen.width, screen.height) {
        let warning = Paragraph::new(message)
            .style(Style::default().fg(app.theme.warning()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(warning, screen);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(screen);

    draw_header(f, chunks[0], app);

    if app.show_help {
        draw_help(f, chunks[1], app);
    } else {
        let (wheel_area, panel_area) = wheel_panel_layout(chunks[1]);
        draw_wheel(f, wheel_area, app);
        draw_panel(f, panel_area, app);
    }

    draw_footer(f, chunks[2], app);

    if let ModalState::Winner(winner) = &app.modal_state {
        render_winner_dialog(f, &winner.label, app.winner_has_duplicate(), &app.theme);
    }
}

/// Renders the title bar: app name, entry count and, while spinning, the name
/// passing under the pointer.
fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(
            "Spin Wheel",
            Style::default()
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} entries", app.wheel_entries().len()),
            Style::default().fg(theme.muted()),
        ),
    ];
    if app.is_spinning() {
        if let Some(label) = app.pointer_label() {
            spans.push(Span::styled("  ▶ ", Style::default().fg(theme.muted())));
            spans.push(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(theme.warning())
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border())),
    );
    f.render_widget(header, area);
}

fn draw_wheel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (wheel_area, gauge_area) = match app.spin_progress(Instant::now()) {
        Some(progress) => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(inner);
            (split[0], Some((split[1], progress)))
        }
        None => (inner, None),
    };

    let lines = render_wheel(&app.wheel_layout(), wheel_area.width, wheel_area.height);
    f.render_widget(Paragraph::new(lines), wheel_area);

    if let Some((gauge, progress)) = gauge_area {
        render_spin_progress(f, gauge, progress, &app.theme);
    }
}

/// Renders the tabbed entries/results panel.
fn draw_panel(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(1), // Actions
            Constraint::Min(0),    // Text
        ])
        .split(area);

    let selected = match app.tab {
        Tab::Entries => 0,
        Tab::Results => 1,
    };
    let tabs = Tabs::new(vec![
        format!("Entries ({})", app.entries.len()),
        format!("Results ({})", app.results.len()),
    ])
    .select(selected)
    .style(Style::default().fg(theme.muted()))
    .highlight_style(
        Style::default()
            .fg(theme.primary())
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border())),
    );
    f.render_widget(tabs, chunks[0]);

    let action_style = if app.is_spinning() {
        Style::default().fg(theme.muted())
    } else {
        Style::default().fg(theme.key())
    };
    let actions = match app.tab {
        Tab::Entries => " [s] Sort  [x] Shuffle  [e] Edit",
        Tab::Results => " [s] Sort  [c] Clear",
    };
    f.render_widget(Paragraph::new(Span::styled(actions, action_style)), chunks[1]);

    draw_panel_text(f, chunks[2], app);
}

fn draw_panel_text(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (title, border_color) = match (app.tab, app.editing) {
        (Tab::Entries, true) => (" Editing (Esc to finish) ", theme.warning()),
        (Tab::Entries, false) => (" Entries ", theme.border()),
        (Tab::Results, _) => (" Results ", theme.border()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    let width = usize::from(inner.width);

    let mut lines: Vec<Line> = match app.tab {
        Tab::Entries if app.text.is_empty() && !app.editing => vec![Line::from(Span::styled(
            "Enter items here",
            Style::default().fg(theme.muted()),
        ))],
        Tab::Entries => app
            .text
            .split('\n')
            .map(|line| Line::from(truncate_text(line, width)))
            .collect(),
        Tab::Results if app.results.is_empty() => vec![Line::from(Span::styled(
            "Results will appear here",
            Style::default().fg(theme.muted()),
        ))],
        Tab::Results => app
            .results
            .results()
            .iter()
            .map(|result| Line::from(truncate_text(&result.label, width)))
            .collect(),
    };

    if app.tab == Tab::Entries && app.editing {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▏", Style::default().fg(theme.warning())));
        }
    }

    // Keep the end of the text in view while typing or as results pile up
    let overflow = lines.len().saturating_sub(usize::from(inner.height));
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    let text = Paragraph::new(lines)
        .style(Style::default().fg(theme.foreground()))
        .scroll((scroll, 0))
        .block(block);
    f.render_widget(text, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(theme.key())
                .add_modifier(Modifier::BOLD),
        )
    };
    let text = |t: &'static str| Span::styled(t, Style::default().fg(theme.muted()));

    let keys = if app.show_help {
        Line::from(vec![text("Press "), key("?"), text(" to close help")])
    } else if app.editing {
        Line::from(vec![
            key("Esc"),
            text(":done "),
            key("Enter"),
            text(":new line "),
            key("Backspace"),
            text(":delete"),
        ])
    } else {
        Line::from(vec![
            key("Space"),
            text(":spin "),
            key("Tab"),
            text(":switch list "),
            key("?"),
            text(":help "),
            key("q"),
            text(":quit"),
        ])
    };

    let footer = Paragraph::new(vec![
        keys,
        Line::from(Span::styled(
            app.status_message.clone(),
            Style::default().fg(theme.foreground()),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border())),
    );
    f.render_widget(footer, area);
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        ))
    };
    let binding = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<12}"), Style::default().fg(theme.key())),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(""),
        section("Wheel"),
        binding("Space", "Spin the wheel"),
        binding("Tab", "Switch between entries and results"),
        Line::from(""),
        section("Entries"),
        binding("e", "Edit entries, one per line"),
        binding("Esc", "Stop editing"),
        binding("s", "Sort alphabetically"),
        binding("x", "Shuffle"),
        Line::from(""),
        section("Results"),
        binding("s", "Sort alphabetically"),
        binding("c", "Clear all results"),
        Line::from(""),
        section("Winner"),
        binding("Enter/Esc", "Close"),
        binding("r", "Remove the winning entry"),
        binding("a", "Remove every entry with the winning name"),
        Line::from(""),
        section("General"),
        binding("?", "Toggle help"),
        binding("q", "Quit"),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border())),
    );
    f.render_widget(help, area);
}
