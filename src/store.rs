//! In-memory item store.
//!
//! This module provides the [`ItemStore`] struct which owns the ordered item
//! collection and the id counter. It is the single writer for item state:
//! every mutation goes through an explicit method, and visible sequences are
//! derived from snapshots via [`FilterMode`]. Persistence is layered on top
//! by the sync service; the store itself performs no I/O.

use crate::entities::item::{TodoItem, UpdateItemArgs};
use crate::filter::FilterMode;

/// Ordered item collection with a monotonically increasing id counter.
///
/// New items are prepended, so the collection reads newest-first until a
/// reorder rearranges it. The counter is seeded at 1 and only consumed by
/// [`ItemStore::add`]; items created by a remote backend arrive with their
/// server-assigned id via [`ItemStore::insert`].
#[derive(Debug)]
pub struct ItemStore {
    items: Vec<TodoItem>,
    next_id: i64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace the collection with a loaded snapshot.
    ///
    /// The id counter is re-seeded past the highest loaded id so later adds
    /// never collide with existing items.
    pub fn load(&mut self, items: Vec<TodoItem>) {
        self.next_id = items.iter().map(|item| item.id).max().map_or(1, |max| max + 1);
        self.items = items;
    }

    /// The full collection in display order.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next locally created item would receive.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    pub fn get(&self, id: i64) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Create an item from the given content and prepend it.
    ///
    /// Content is trimmed first; blank content is rejected and leaves the
    /// collection (and the id counter) unchanged.
    ///
    /// # Returns
    /// The created item, or `None` when the content was blank
    pub fn add(&mut self, content: &str) -> Option<TodoItem> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let item = TodoItem::new(self.next_id, content);
        self.next_id += 1;
        self.items.insert(0, item.clone());
        Some(item)
    }

    /// Prepend an item created elsewhere, typically by a remote backend.
    ///
    /// The id counter is bumped past the inserted id so the uniqueness
    /// invariant holds even if a local add follows.
    pub fn insert(&mut self, item: TodoItem) {
        self.next_id = self.next_id.max(item.id + 1);
        self.items.insert(0, item);
    }

    /// Apply a partial update to the item with the given id.
    ///
    /// Only fields set in the patch are replaced; collection order is
    /// preserved. An unknown id is a no-op.
    ///
    /// # Returns
    /// The updated item, or `None` when no item matches
    pub fn apply_patch(&mut self, id: i64, patch: &UpdateItemArgs) -> Option<TodoItem> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;

        if let Some(content) = &patch.content {
            item.content = content.clone();
        }
        if let Some(completed) = patch.completed {
            item.completed = completed;
        }
        if let Some(deleted) = patch.deleted {
            item.deleted = deleted;
        }
        if let Some(sort_order) = patch.sort_order {
            item.sort_order = Some(sort_order);
        }

        Some(item.clone())
    }

    /// Snapshot of the items visible under the given filter mode.
    pub fn filtered(&self, mode: FilterMode) -> Vec<TodoItem> {
        mode.apply(&self.items)
    }

    /// Items currently flagged as deleted, in collection order.
    pub fn deleted_items(&self) -> Vec<TodoItem> {
        self.items.iter().filter(|item| item.deleted).cloned().collect()
    }

    /// Move the visible item at `from` to `to` within the view derived by
    /// `mode`, then recompute each visible item's `sort_order` as its new
    /// 1-based position in that view.
    ///
    /// Visible items are permuted among the collection slots they already
    /// occupy; items outside the view keep their positions and ordering
    /// keys. Out-of-bounds indices are a no-op.
    ///
    /// # Returns
    /// The visible items in their new order (the set whose `sort_order`
    /// changed and needs persisting), empty on a no-op
    pub fn reorder(&mut self, from: usize, to: usize, mode: FilterMode) -> Vec<TodoItem> {
        let slots: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| mode.matches(item))
            .map(|(index, _)| index)
            .collect();

        if from >= slots.len() || to >= slots.len() {
            return Vec::new();
        }

        let mut order = slots.clone();
        let moved = order.remove(from);
        order.insert(to, moved);

        let mut reordered = Vec::with_capacity(order.len());
        for (position, &source) in order.iter().enumerate() {
            let mut item = self.items[source].clone();
            item.sort_order = Some(position as i64 + 1);
            reordered.push(item);
        }
        for (&slot, item) in slots.iter().zip(reordered.iter()) {
            self.items[slot] = item.clone();
        }

        reordered
    }

    /// Remove every soft-deleted item from the collection.
    ///
    /// # Returns
    /// The removed items, in collection order
    pub fn purge_deleted(&mut self) -> Vec<TodoItem> {
        let mut removed = Vec::new();
        self.items.retain(|item| {
            if item.deleted {
                removed.push(item.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
