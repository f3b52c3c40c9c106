//! Waiting-status indicator with scoped acquisition

use std::cell::RefCell;
use std::rc::Rc;

/// Shared "busy" status shown while a blocking action runs
///
/// Clones share the same status. The status is held by [`BusyGuard`]s and
/// cleared when the last guard is dropped, so every exit path releases it.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    inner: Rc<RefCell<Statuses>>,
}

#[derive(Debug, Default)]
struct Statuses {
    next_id: u64,
    held: Vec<(u64, String)>,
}

impl BusyIndicator {
    /// An idle indicator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `status` until the returned guard is dropped
    pub fn acquire(&self, status: impl Into<String>) -> BusyGuard {
        let mut statuses = self.inner.borrow_mut();
        let id = statuses.next_id;
        statuses.next_id += 1;
        statuses.held.push((id, status.into()));
        BusyGuard {
            id,
            inner: Rc::clone(&self.inner),
        }
    }

    /// The most recently acquired status still held
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.inner
            .borrow()
            .held
            .last()
            .map(|(_, status)| status.clone())
    }

    /// Whether any guard is alive
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.inner.borrow().held.is_empty()
    }
}

/// Releases its own status when dropped, whatever the drop order
#[derive(Debug)]
#[must_use = "the busy status is released as soon as the guard is dropped"]
pub struct BusyGuard {
    id: u64,
    inner: Rc<RefCell<Statuses>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.borrow_mut().held.retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_step(busy: &BusyIndicator) -> Result<(), String> {
        let _guard = busy.acquire("deleting");
        Err("push rejected".to_string())
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let busy = BusyIndicator::new();
        {
            let _guard = busy.acquire("deleting");
            assert!(busy.is_busy());
            assert_eq!(busy.current().as_deref(), Some("deleting"));
        }
        assert!(!busy.is_busy());
        assert_eq!(busy.current(), None);
    }

    #[test]
    fn test_guard_releases_on_error_path() {
        let busy = BusyIndicator::new();
        assert!(failing_step(&busy).is_err());
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_nested_guards() {
        let busy = BusyIndicator::new();
        let outer = busy.acquire("fetching");
        {
            let _inner = busy.clone().acquire("deleting");
            assert_eq!(busy.current().as_deref(), Some("deleting"));
        }
        assert_eq!(busy.current().as_deref(), Some("fetching"));
        drop(outer);
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_out_of_order_drop_releases_own_status() {
        let busy = BusyIndicator::new();
        let outer = busy.acquire("fetching");
        let inner = busy.acquire("deleting");

        drop(outer);
        assert_eq!(busy.current().as_deref(), Some("deleting"));

        drop(inner);
        assert!(!busy.is_busy());
    }
}
