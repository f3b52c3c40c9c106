//! Remote branch list widget

use crate::panel::{BranchKind, DisplayRow};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Widget for displaying the branches of one remote
#[derive(Debug)]
pub struct Widget<'a> {
    rows: &'a [DisplayRow],
    title: String,
    focused: bool,
}

impl<'a> Widget<'a> {
    /// Create a widget over rendered rows
    #[must_use]
    pub fn new(rows: &'a [DisplayRow]) -> Self {
        Self {
            rows,
            title: format!(" Remote Branches ({}) ", rows.len()),
            focused: false,
        }
    }

    /// Set a custom title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Highlight the border when the list has focus
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Convert to a List widget
    #[must_use]
    pub fn to_list(&self) -> List<'a> {
        let items: Vec<ListItem<'_>> = self.rows.iter().map(render_item).collect();
        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        List::new(items).block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
    }
}

fn render_item(row: &DisplayRow) -> ListItem<'static> {
    let mut name_style = Style::default().fg(if row.diffed {
        Color::Magenta
    } else {
        kind_to_color(row.kind)
    });
    if row.selected {
        name_style = name_style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    let marker = if row.diffed { "◆ " } else { "  " };
    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Magenta)),
        Span::styled(row.text.clone(), name_style),
    ]))
}

/// Colour of a branch name by its prefix
#[must_use]
pub const fn kind_to_color(kind: BranchKind) -> Color {
    match kind {
        BranchKind::Feature => Color::Green,
        BranchKind::Bugfix => Color::Yellow,
        BranchKind::Hotfix => Color::Red,
        BranchKind::Other => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str, selected: bool) -> DisplayRow {
        DisplayRow {
            text: text.to_string(),
            kind: BranchKind::of(text),
            selected,
            diffed: false,
        }
    }

    #[test]
    fn test_title_counts_rows() {
        let rows = vec![row("main", true), row("feature/x", false)];
        let widget = Widget::new(&rows);
        assert!(widget.title.contains('2'));
    }

    #[test]
    fn test_custom_title() {
        let rows = vec![row("main", true)];
        let widget = Widget::new(&rows).title(" origin ");
        assert_eq!(widget.title, " origin ");
    }

    #[test]
    fn test_kind_to_color() {
        assert_eq!(kind_to_color(BranchKind::Feature), Color::Green);
        assert_eq!(kind_to_color(BranchKind::Bugfix), Color::Yellow);
        assert_eq!(kind_to_color(BranchKind::Hotfix), Color::Red);
        assert_eq!(kind_to_color(BranchKind::Other), Color::White);
    }

    #[test]
    fn test_to_list_len() {
        let rows = vec![row("main", true), row("dev", false)];
        let list = Widget::new(&rows).focused(true).to_list();
        assert_eq!(list.len(), 2);
    }
}
