//! Keybinding configuration

use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Select next item
    NextItem,
    /// Select previous item
    PrevItem,
    /// Open the selected remote's branches
    Open,
    /// Cycle between local branches and remotes
    SwitchContext,
    /// Leave the remote branches list
    Escape,
    /// Check out the selected branch
    Checkout,
    /// Merge the selected branch into the checked-out branch
    Merge,
    /// Delete the selected branch on its remote
    Delete,
    /// Rebase the checked-out branch onto the selected branch
    Rebase,
    /// Set the selected branch as upstream of the checked-out branch
    SetUpstream,
    /// Open the reset menu
    ResetMenu,
    /// Create a new branch off the selected branch
    NewBranch,
    /// Toggle diffing against the selected branch
    ToggleDiff,
    /// Quit application
    Quit,
}

/// Categories for grouping actions in hint display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGroup {
    /// Moving around the lists
    Navigation,
    /// Actions on the selected branch
    Branch,
    /// Miscellaneous actions
    Other,
}

impl ActionGroup {
    /// Get the display title for this group
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Branch => "Branch",
            Self::Other => "Other",
        }
    }
}

impl Action {
    /// Get the display description for this action
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NextItem => "Select next",
            Self::PrevItem => "Select previous",
            Self::Open => "Open remote",
            Self::SwitchContext => "Switch local/remotes",
            Self::Escape => "Back to remotes",
            Self::Checkout => "Checkout",
            Self::Merge => "Merge into checked-out branch",
            Self::Delete => "Delete remote branch",
            Self::Rebase => "Rebase checked-out branch onto this",
            Self::SetUpstream => "Set as upstream",
            Self::ResetMenu => "Reset to this branch",
            Self::NewBranch => "New branch off this",
            Self::ToggleDiff => "Toggle diff",
            Self::Quit => "Quit",
        }
    }

    /// Get the group this action belongs to
    #[must_use]
    pub const fn group(self) -> ActionGroup {
        match self {
            Self::NextItem | Self::PrevItem | Self::Open | Self::SwitchContext | Self::Escape => {
                ActionGroup::Navigation
            }
            Self::Checkout
            | Self::Merge
            | Self::Delete
            | Self::Rebase
            | Self::SetUpstream
            | Self::ResetMenu
            | Self::NewBranch
            | Self::ToggleDiff => ActionGroup::Branch,
            Self::Quit => ActionGroup::Other,
        }
    }
}

/// Keybinding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Map of key strings to actions (for serialization)
    bindings: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert("j".to_string(), Action::NextItem);
        bindings.insert("Down".to_string(), Action::NextItem);
        bindings.insert("k".to_string(), Action::PrevItem);
        bindings.insert("Up".to_string(), Action::PrevItem);
        bindings.insert("Enter".to_string(), Action::Open);
        bindings.insert("Tab".to_string(), Action::SwitchContext);
        bindings.insert("Esc".to_string(), Action::Escape);
        bindings.insert("q".to_string(), Action::Quit);
        // Branch actions
        bindings.insert(" ".to_string(), Action::Checkout);
        bindings.insert("M".to_string(), Action::Merge);
        bindings.insert("d".to_string(), Action::Delete);
        bindings.insert("r".to_string(), Action::Rebase);
        bindings.insert("u".to_string(), Action::SetUpstream);
        bindings.insert("g".to_string(), Action::ResetMenu);
        bindings.insert("n".to_string(), Action::NewBranch);
        bindings.insert("W".to_string(), Action::ToggleDiff);

        Self { bindings }
    }
}

impl KeyBindings {
    /// Merge in any missing default keybindings
    ///
    /// This ensures that new keybindings added in updates are available
    /// even if the user has an older saved config.
    pub fn merge_defaults(&mut self) {
        let defaults = Self::default();
        for (key, action) in defaults.bindings {
            self.bindings.entry(key).or_insert(action);
        }
    }

    /// Get the action for a key event
    #[must_use]
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let key_str = key_to_string(code, modifiers);
        self.bindings.get(&key_str).copied()
    }

    /// Set a keybinding
    pub fn set(&mut self, key: &str, action: Action) {
        self.bindings.insert(key.to_string(), action);
    }

    /// Get all bindings for an action
    #[must_use]
    pub fn keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter_map(|(k, &v)| if v == action { Some(k.clone()) } else { None })
            .collect()
    }

    /// Format key(s) for an action for display (e.g., "j/Down")
    #[must_use]
    pub fn format_keys(&self, action: Action) -> String {
        let mut keys = self.keys_for_action(action);
        // Single characters first, then alphabetical
        keys.sort_by(|a, b| {
            let a_simple = a.chars().count() == 1;
            let b_simple = b.chars().count() == 1;
            b_simple.cmp(&a_simple).then_with(|| a.cmp(b))
        });
        keys.iter()
            .map(|k| {
                if k == " " {
                    "Space".to_string()
                } else {
                    k.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Status bar hints for the actions of `group`
    #[must_use]
    pub fn status_hints(&self, group: ActionGroup) -> String {
        let actions: &[Action] = match group {
            ActionGroup::Navigation => &[Action::Open, Action::SwitchContext, Action::Escape],
            ActionGroup::Branch => &[
                Action::Checkout,
                Action::Merge,
                Action::Delete,
                Action::Rebase,
                Action::SetUpstream,
                Action::ResetMenu,
                Action::NewBranch,
                Action::ToggleDiff,
            ],
            ActionGroup::Other => &[Action::Quit],
        };

        actions
            .iter()
            .filter_map(|&action| {
                let keys = self.format_keys(action);
                (!keys.is_empty()).then(|| format!("[{keys}] {}", action.description()))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// Convert a key code and modifiers to a string representation
#[must_use]
pub fn key_to_string(code: KeyCode, modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
        parts.push("Shift".to_string());
    }

    let key_part = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return String::new(),
    };

    parts.push(key_part);
    parts.join("+")
}
