//! Plain name list widget for local branches and remotes

use crate::panel::SelectionState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Widget listing names with a selection and an optional marked entry
#[derive(Debug)]
pub struct Widget<'a> {
    names: &'a [String],
    selection: SelectionState,
    marked: Option<&'a str>,
    title: String,
}

impl<'a> Widget<'a> {
    /// Create a widget over `names`
    #[must_use]
    pub fn new(names: &'a [String], selection: SelectionState) -> Self {
        Self {
            names,
            selection,
            marked: None,
            title: String::new(),
        }
    }

    /// Prefix the entry equal to `name` with `*`
    #[must_use]
    pub const fn marked(mut self, name: Option<&'a str>) -> Self {
        self.marked = name;
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Convert to a List widget
    #[must_use]
    pub fn to_list(&self) -> List<'a> {
        let items: Vec<ListItem<'_>> = self
            .names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let mut style = Style::default();
                if self.selection.selected() == Some(index) {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                let marker = if self.marked == Some(name.as_str()) {
                    "* "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(name.clone(), style),
                ]))
            })
            .collect();

        List::new(items).block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }
}
