//! Filter view derivation.
//!
//! A [`FilterMode`] selects which slice of the item collection is visible.
//! Derivation is pure: it never mutates the collection and always preserves
//! the collection's order. Filter state is process-local and never
//! persisted.

use crate::entities::item::TodoItem;

/// Which slice of the collection is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Every item not in the trash
    #[default]
    All,
    /// Completed items not in the trash
    Completed,
    /// Not-yet-completed items not in the trash
    Unchecked,
    /// Trash contents only
    Deleted,
}

impl FilterMode {
    /// Whether a single item is visible under this mode.
    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            FilterMode::Completed => item.completed && !item.deleted,
            FilterMode::Unchecked => !item.completed && !item.deleted,
            FilterMode::Deleted => item.deleted,
            FilterMode::All => !item.deleted,
        }
    }

    /// Derive the visible sub-sequence of `items` under this mode.
    pub fn apply(&self, items: &[TodoItem]) -> Vec<TodoItem> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}
