//! Shared test doubles for service-level tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use taskdeck::backend::{Backend, BackendError};
use taskdeck::{CreateItemArgs, TodoItem, UpdateItemArgs};

/// One recorded backend invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Fetch,
    Create(String),
    Update(i64, UpdateItemArgs),
    Delete(i64),
}

/// In-memory backend double recording every call.
///
/// Ids listed via `failing_updates` / `failing_deletes` make the matching
/// call return a network error; the call is still recorded, so tests can
/// check both the accounting and the resulting divergence.
pub struct MemoryBackend {
    items: Mutex<Vec<TodoItem>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<BackendCall>>,
    fail_updates: Vec<i64>,
    fail_deletes: Vec<i64>,
    update_delay: Option<Duration>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<TodoItem>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        Self {
            items: Mutex::new(items),
            next_id: AtomicI64::new(next_id),
            calls: Mutex::new(Vec::new()),
            fail_updates: Vec::new(),
            fail_deletes: Vec::new(),
            update_delay: None,
        }
    }

    pub fn failing_updates(mut self, ids: &[i64]) -> Self {
        self.fail_updates = ids.to_vec();
        self
    }

    pub fn failing_deletes(mut self, ids: &[i64]) -> Self {
        self.fail_deletes = ids.to_vec();
        self
    }

    /// Make every update call sleep before resolving.
    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn items(&self) -> Vec<TodoItem> {
        self.items.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn fetch_items(&self) -> Result<Vec<TodoItem>, BackendError> {
        self.record(BackendCall::Fetch);
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create_item(&self, args: CreateItemArgs) -> Result<TodoItem, BackendError> {
        self.record(BackendCall::Create(args.content.clone()));
        let item = TodoItem {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            content: args.content,
            completed: args.completed,
            deleted: args.deleted,
            sort_order: args.sort_order,
        };
        self.items.lock().unwrap().insert(0, item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: i64, args: UpdateItemArgs) -> Result<TodoItem, BackendError> {
        self.record(BackendCall::Update(id, args.clone()));
        if let Some(delay) = self.update_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_updates.contains(&id) {
            return Err(BackendError::Network("injected failure".to_string()));
        }

        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("item {id}")))?;
        if let Some(content) = args.content {
            item.content = content;
        }
        if let Some(completed) = args.completed {
            item.completed = completed;
        }
        if let Some(deleted) = args.deleted {
            item.deleted = deleted;
        }
        if let Some(sort_order) = args.sort_order {
            item.sort_order = Some(sort_order);
        }
        Ok(item.clone())
    }

    async fn delete_item(&self, id: i64) -> Result<(), BackendError> {
        self.record(BackendCall::Delete(id));
        if self.fail_deletes.contains(&id) {
            return Err(BackendError::Network("injected failure".to_string()));
        }

        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(BackendError::NotFound(format!("item {id}")));
        }
        Ok(())
    }
}

/// A plain active item.
pub fn item(id: i64, content: &str) -> TodoItem {
    TodoItem::new(id, content)
}

/// An item already in the trash.
pub fn deleted_item(id: i64, content: &str) -> TodoItem {
    TodoItem {
        deleted: true,
        ..TodoItem::new(id, content)
    }
}
