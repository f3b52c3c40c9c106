//! Modal rendering for gates and errors

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::colors;
use crate::panel::{MenuItem, TextInput};

/// Create a centered rect with percentage width and absolute height
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_modal(
    frame: &mut Frame<'_>,
    title: &str,
    lines: Vec<Line<'_>>,
    border: ratatui::style::Color,
    percent_x: u16,
) {
    let width = centered_rect_absolute(percent_x, 0, frame.area()).width;
    // Height: wrapped content lines + 2 for borders
    let height = u16::try_from(wrapped_height(&lines, width.saturating_sub(2)) + 2)
        .unwrap_or(u16::MAX);
    let area = centered_rect_absolute(percent_x, height, frame.area());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .style(Style::default().bg(colors::MODAL_BG))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Rows `lines` occupy when wrapped to `inner_width` columns
fn wrapped_height(lines: &[Line<'_>], inner_width: u16) -> usize {
    let inner_width = usize::from(inner_width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(inner_width).max(1))
        .sum()
}

/// Render a confirmation overlay with yes/no buttons
pub fn render_confirm_overlay(frame: &mut Frame<'_>, title: &str, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(colors::TEXT_PRIMARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(colors::ACCENT_POSITIVE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("es  ", Style::default().fg(colors::TEXT_PRIMARY)),
            Span::styled(
                "[N]",
                Style::default()
                    .fg(colors::ACCENT_NEGATIVE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("o", Style::default().fg(colors::TEXT_PRIMARY)),
        ]),
    ];

    render_modal(frame, title, lines, colors::MODAL_BORDER_WARNING, 60);
}

/// Render a single-line text prompt with a cursor marker
pub fn render_input_overlay(frame: &mut Frame<'_>, title: &str, prompt: &str, input: &TextInput) {
    let text = input.text();
    let cursor = input.cursor().min(text.len());
    let (before, after) = text.split_at(cursor);

    let lines = vec![
        Line::from(Span::styled(prompt, Style::default().fg(colors::TEXT_DIM))),
        Line::from(""),
        Line::from(Span::styled(
            format!("{before}│{after}"),
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .bg(colors::INPUT_BG)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: submit | ←→: move | Esc: cancel",
            Style::default().fg(colors::TEXT_MUTED),
        )),
    ];

    render_modal(frame, title, lines, colors::BORDER, 60);
}

/// Render a menu with the highlighted entry marked
pub fn render_menu_overlay<A>(
    frame: &mut Frame<'_>,
    title: &str,
    items: &[MenuItem<A>],
    selected: usize,
) {
    let mut lines: Vec<Line<'_>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if index == selected {
                Line::from(Span::styled(
                    format!("▶ {}", item.label),
                    Style::default()
                        .fg(colors::SELECTED)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", item.label),
                    Style::default().fg(colors::TEXT_PRIMARY),
                ))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑↓: select | Enter: run | Esc: cancel",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    render_modal(frame, title, lines, colors::BORDER, 60);
}

/// Render an error modal with the message wrapped to the modal width
pub fn render_error_modal(frame: &mut Frame<'_>, title: &str, message: &str) {
    let mut lines: Vec<Line<'_>> = vec![
        Line::from(Span::styled(
            format!("✖ {title}"),
            Style::default()
                .fg(colors::MODAL_BORDER_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        message
            .lines()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(colors::TEXT_PRIMARY)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    render_modal(frame, title, lines, colors::MODAL_BORDER_ERROR, 60);
}
