//! Status bar widget

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Widget for displaying the status bar
#[derive(Debug)]
pub struct Widget {
    content: StatusContent,
}

/// Content type for the status bar
#[derive(Debug, PartialEq, Eq)]
pub enum StatusContent {
    /// Key hints for the current context
    Hints(String),
    /// A blocking action is running
    Busy(String),
}

impl Widget {
    /// Create a status bar showing key hints
    #[must_use]
    pub fn hints(hints: impl Into<String>) -> Self {
        Self {
            content: StatusContent::Hints(hints.into()),
        }
    }

    /// Create a status bar showing a waiting status
    #[must_use]
    pub fn busy(status: impl Into<String>) -> Self {
        Self {
            content: StatusContent::Busy(status.into()),
        }
    }

    /// Convert to a Paragraph widget
    #[must_use]
    pub fn to_paragraph(&self) -> Paragraph<'_> {
        let span = match &self.content {
            StatusContent::Busy(status) => Span::styled(
                format!(" ⟳ {status}… "),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            StatusContent::Hints(hints) => {
                Span::styled(format!(" {hints} "), Style::default().fg(Color::Gray))
            }
        };

        Paragraph::new(Line::from(span)).style(Style::default().bg(Color::DarkGray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_hints() {
        let widget = Widget::hints("[q] Quit");
        assert_eq!(widget.content, StatusContent::Hints("[q] Quit".to_string()));
    }

    #[test]
    fn test_status_bar_busy() {
        let widget = Widget::busy("deleting");
        assert_eq!(widget.content, StatusContent::Busy("deleting".to_string()));
        let _paragraph = widget.to_paragraph();
    }
}
