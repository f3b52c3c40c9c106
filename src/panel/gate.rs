//! Modal confirmation, prompt and menu gates
//!
//! A gate suspends panel input until the user resolves it. The continuation
//! `A` is stored inside the open gate and handed back exactly once when the
//! user affirms; cancelling drops it.

use thiserror::Error;

use super::TextInput;

/// Raised when a gate is opened while another one is still showing
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// A modal is already open
    #[error("a modal is already open")]
    Conflict,
}

/// One entry of a menu gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<A> {
    /// Text shown for the entry
    pub label: String,
    /// Continuation run when the entry is picked
    pub action: A,
}

/// A modal interaction holding its pending continuation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<A> {
    /// No modal showing
    Closed,
    /// Yes/no question
    Confirm {
        /// Modal title
        title: String,
        /// Question text
        message: String,
        /// Runs on "yes"
        action: A,
    },
    /// Free-text question
    Prompt {
        /// Modal title
        title: String,
        /// Prompt text
        message: String,
        /// The editable answer
        input: TextInput,
        /// Runs with the trimmed answer on submit
        action: A,
    },
    /// Pick one of several continuations
    Menu {
        /// Modal title
        title: String,
        /// Entries in display order
        items: Vec<MenuItem<A>>,
        /// Highlighted entry
        selected: usize,
    },
}

impl<A> Default for Gate<A> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<A> Gate<A> {
    /// Whether a modal is showing
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Title of the open modal
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Confirm { title, .. } | Self::Prompt { title, .. } | Self::Menu { title, .. } => {
                Some(title)
            }
        }
    }

    /// Open a yes/no modal
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Conflict`] if a modal is already open; the open
    /// one is left as it was.
    pub fn open_confirm(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        action: A,
    ) -> Result<(), GateError> {
        self.ensure_closed()?;
        *self = Self::Confirm {
            title: title.into(),
            message: message.into(),
            action,
        };
        Ok(())
    }

    /// Open a text prompt seeded with `initial_text`
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Conflict`] if a modal is already open
    pub fn open_prompt(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        initial_text: impl Into<String>,
        action: A,
    ) -> Result<(), GateError> {
        self.ensure_closed()?;
        *self = Self::Prompt {
            title: title.into(),
            message: message.into(),
            input: TextInput::new(initial_text),
            action,
        };
        Ok(())
    }

    /// Open a menu with the first item highlighted
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Conflict`] if a modal is already open
    pub fn open_menu(
        &mut self,
        title: impl Into<String>,
        items: Vec<MenuItem<A>>,
    ) -> Result<(), GateError> {
        self.ensure_closed()?;
        *self = Self::Menu {
            title: title.into(),
            items,
            selected: 0,
        };
        Ok(())
    }

    /// Affirm a confirm modal, closing it and returning its continuation
    ///
    /// Other modal kinds are left untouched.
    pub fn confirm(&mut self) -> Option<A> {
        match std::mem::take(self) {
            Self::Confirm { action, .. } => Some(action),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Submit a prompt, closing it and returning the continuation with the
    /// trimmed answer
    pub fn submit(&mut self) -> Option<(A, String)> {
        match std::mem::take(self) {
            Self::Prompt { input, action, .. } => Some((action, input.text().trim().to_string())),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Pick the highlighted menu entry, closing the menu
    pub fn pick(&mut self) -> Option<A> {
        match std::mem::take(self) {
            Self::Menu {
                mut items,
                selected,
                ..
            } => {
                if selected < items.len() {
                    Some(items.swap_remove(selected).action)
                } else {
                    None
                }
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Dismiss whatever is open. Returns whether anything was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }

    /// Text field of an open prompt
    pub fn input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Self::Prompt { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Move the menu highlight down, stopping at the last entry
    pub fn menu_next(&mut self) {
        if let Self::Menu {
            items, selected, ..
        } = self
            && *selected + 1 < items.len()
        {
            *selected += 1;
        }
    }

    /// Move the menu highlight up, stopping at the first entry
    pub fn menu_previous(&mut self) {
        if let Self::Menu { selected, .. } = self {
            *selected = selected.saturating_sub(1);
        }
    }

    const fn ensure_closed(&self) -> Result<(), GateError> {
        if self.is_open() {
            Err(GateError::Conflict)
        } else {
            Ok(())
        }
    }
}
