//! Detail pane widget

use crate::panel::{DetailView, TaskState};
use ratatui::{
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Widget rendering the detail view of the selected branch
#[derive(Debug, Clone, Copy)]
pub struct Widget<'a> {
    view: &'a DetailView,
    state: &'a TaskState,
}

impl<'a> Widget<'a> {
    /// Create a widget over a detail view and its task state
    #[must_use]
    pub const fn new(view: &'a DetailView, state: &'a TaskState) -> Self {
        Self { view, state }
    }

    /// Parsed content, keeping the colours git emitted
    #[must_use]
    pub fn text(&self) -> Text<'static> {
        let content = self.view.lines.join("\n");
        let mut text = ansi_to_tui::IntoText::into_text(&content).unwrap_or_else(|_| {
            // Fallback to plain text if parsing fails
            Text::from(
                self.view
                    .lines
                    .iter()
                    .map(|line| Line::from(line.clone()))
                    .collect::<Vec<_>>(),
            )
        });

        if let TaskState::Failed(reason) = self.state {
            text.lines.push(Line::styled(
                reason.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        text
    }

    /// Convert to a Paragraph widget
    #[must_use]
    pub fn to_paragraph(&self) -> Paragraph<'static> {
        let title = match self.state {
            TaskState::Running => format!(" {} … ", self.view.title),
            _ => format!(" {} ", self.view.title),
        };

        Paragraph::new(self.text())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White)),
            )
            .wrap(Wrap { trim: false })
    }
}
