//! Selected-line bookkeeping for list panels

/// Index of the selected row in a list panel
///
/// `None` means nothing is selected. After [`SelectionState::clamp`] the
/// selection is `None` exactly when the list is empty and otherwise in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    /// Nothing selected
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Start at `index`; callers clamp once the list length is known
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self {
            selected: Some(index),
        }
    }

    /// Currently selected index
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Fit the selection to a list of `len` items
    ///
    /// An in-range index is kept, an out-of-range one moves to the last item,
    /// and an empty selection on a non-empty list moves to the first item.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(index), len) => Some(index.min(len - 1)),
        };
    }

    /// Select the first row; clamp afterwards if the list may be empty
    pub const fn select_first(&mut self) {
        self.selected = Some(0);
    }

    /// Move down one row, stopping at the last. Returns whether it moved.
    pub fn select_next(&mut self, len: usize) -> bool {
        let before = self.selected;
        self.clamp(len);
        if let Some(index) = self.selected
            && index + 1 < len
        {
            self.selected = Some(index + 1);
        }
        self.selected != before
    }

    /// Move up one row, stopping at the first. Returns whether it moved.
    pub fn select_previous(&mut self, len: usize) -> bool {
        let before = self.selected;
        self.clamp(len);
        if let Some(index) = self.selected {
            self.selected = Some(index.saturating_sub(1));
        }
        self.selected != before
    }

    /// The selected item of `items`, if any
    #[must_use]
    pub fn get<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.selected.and_then(|index| items.get(index))
    }
}
