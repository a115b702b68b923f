//! Synchronization service module for taskdeck.
//!
//! This module provides the [`SyncService`] struct which keeps the in-memory
//! item collection, the visible filtered view, and the configured persistence
//! strategy consistent after create/update/delete/reorder operations.
//!
//! The sync service acts as the main data layer for an embedding UI, offering:
//! - Optimistic in-memory mutations with immediate reads
//! - Fire-and-forget persistence (snapshot writes or per-item REST calls)
//! - Snapshot writes serialized in mutation order, newest state lands last
//! - An awaited all-or-nothing barrier for the empty-trash operation
//! - Process-local filter state driving the visible view

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::backend::rest::RestBackend;
use crate::backend::Backend;
use crate::config::Config;
use crate::constants::{STRATEGY_LOCAL, STRATEGY_REST};
use crate::entities::item::{CreateItemArgs, TodoItem, UpdateItemArgs};
use crate::filter::FilterMode;
use crate::storage::LocalStore;
use crate::store::ItemStore;

/// Where mutations are persisted.
///
/// The two strategies are interchangeable behind the service but never
/// combined: a service instance writes whole-collection snapshots or talks
/// to a remote backend, not both.
pub enum Persistence {
    /// Whole-collection snapshots written to a local file
    Local(LocalStore),
    /// Per-item calls against a remote service
    Remote(Arc<dyn Backend>),
}

impl Persistence {
    /// Build the persistence strategy selected by the configuration.
    ///
    /// # Errors
    /// Returns an error if the strategy name is unknown or the local
    /// snapshot location cannot be resolved
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.persistence.strategy.as_str() {
            STRATEGY_LOCAL => {
                let store = match &config.persistence.local.path {
                    Some(path) => LocalStore::new(path),
                    None => LocalStore::default_location()?,
                };
                Ok(Persistence::Local(store))
            }
            STRATEGY_REST => Ok(Persistence::Remote(Arc::new(RestBackend::new(
                &config.persistence.rest.base_url,
            )))),
            other => anyhow::bail!("Unknown persistence strategy: {}", other),
        }
    }

    /// The strategy identifier ("local" or "rest").
    pub fn strategy(&self) -> &str {
        match self {
            Persistence::Local(_) => STRATEGY_LOCAL,
            Persistence::Remote(_) => STRATEGY_REST,
        }
    }
}

/// Service that keeps the item store and the persistence layer in sync.
///
/// The `SyncService` is the primary access layer for embedders: every user
/// event (submit, edit, toggle, reorder, empty-trash) maps to one method
/// which mutates the in-memory store first and then dispatches the matching
/// persistence call. Reads always reflect the optimistic in-memory state.
///
/// # Features
/// - Strategy-agnostic persistence via [`Persistence`]
/// - Thread-safe state behind `Arc<Mutex<>>`, cheap to clone
/// - Fire-and-forget writes with failures logged, never surfaced
/// - Spawned persistence tasks are tracked so embedders can drain them
///
/// # Example
/// ```rust,no_run
/// use taskdeck::storage::LocalStore;
/// use taskdeck::sync::{Persistence, SyncService};
///
/// # async fn example() -> anyhow::Result<()> {
/// let service = SyncService::new(Persistence::Local(LocalStore::new("todos.json")));
/// service.load().await?;
///
/// service.add_item("buy milk").await?;
/// let visible = service.visible_items().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SyncService {
    store: Arc<Mutex<ItemStore>>,
    persistence: Arc<Persistence>,
    filter: Arc<Mutex<FilterMode>>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
    save_lock: Arc<Mutex<()>>,
}

impl SyncService {
    /// Creates a new service with an empty store and the given strategy.
    pub fn new(persistence: Persistence) -> Self {
        Self {
            store: Arc::new(Mutex::new(ItemStore::new())),
            persistence: Arc::new(persistence),
            filter: Arc::new(Mutex::new(FilterMode::default())),
            pending: Arc::new(Mutex::new(Vec::new())),
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a new service from the persistence section of a configuration.
    ///
    /// # Errors
    /// Returns an error if the configured strategy cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Persistence::from_config(config)?))
    }

    /// The active strategy identifier ("local" or "rest").
    pub fn strategy(&self) -> &str {
        self.persistence.strategy()
    }

    /// Populate the store from the configured persistence source.
    ///
    /// Local strategy reads the snapshot file (a missing file yields an
    /// empty collection); remote strategy fetches the full collection from
    /// the backend. The id counter is re-seeded past the highest loaded id.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be read or the backend
    /// fetch fails
    pub async fn load(&self) -> Result<()> {
        match self.persistence.as_ref() {
            Persistence::Local(local) => {
                let items = local.load()?;
                info!("✅ Loaded {} items from snapshot", items.len());
                self.store.lock().await.load(items);
            }
            Persistence::Remote(backend) => {
                info!("🔄 Fetching items from {} backend...", backend.backend_type());
                let items = backend
                    .fetch_items()
                    .await
                    .map_err(|e| anyhow::anyhow!("Backend error: {}", e))?;
                info!("✅ Fetched {} items from backend", items.len());
                self.store.lock().await.load(items);
            }
        }
        Ok(())
    }

    /// Snapshot of the full collection in display order.
    pub async fn items(&self) -> Vec<TodoItem> {
        self.store.lock().await.items().to_vec()
    }

    /// Snapshot of the items visible under the current filter mode.
    pub async fn visible_items(&self) -> Vec<TodoItem> {
        let mode = *self.filter.lock().await;
        self.store.lock().await.filtered(mode)
    }

    /// Snapshot of the items visible under the given filter mode.
    pub async fn filtered_items(&self, mode: FilterMode) -> Vec<TodoItem> {
        self.store.lock().await.filtered(mode)
    }

    /// Set the filter mode driving [`SyncService::visible_items`].
    pub async fn set_filter(&self, mode: FilterMode) {
        *self.filter.lock().await = mode;
    }

    pub async fn current_filter(&self) -> FilterMode {
        *self.filter.lock().await
    }

    /// Create a new item from the given content and prepend it.
    ///
    /// Blank content (after trimming) is rejected without touching the
    /// store or the persistence layer. With the local strategy the item id
    /// comes from the store's counter and the snapshot write runs in the
    /// background; with the remote strategy the create call is awaited and
    /// the server-assigned item is what enters the store.
    ///
    /// # Arguments
    /// * `content` - The text of the new item
    ///
    /// # Returns
    /// The created item, or `None` when the content was blank
    ///
    /// # Errors
    /// Returns an error if the remote create call fails
    pub async fn add_item(&self, content: &str) -> Result<Option<TodoItem>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        match self.persistence.as_ref() {
            Persistence::Local(_) => {
                let item = self.store.lock().await.add(content);
                self.persist_snapshot().await;
                Ok(item)
            }
            Persistence::Remote(backend) => {
                let args = CreateItemArgs {
                    content: content.to_string(),
                    completed: false,
                    deleted: false,
                    sort_order: None,
                };
                let created = backend
                    .create_item(args)
                    .await
                    .map_err(|e| anyhow::anyhow!("Backend error: {}", e))?;
                info!("✅ Created item {} via backend", created.id);
                self.store.lock().await.insert(created.clone());
                Ok(Some(created))
            }
        }
    }

    /// Apply a partial update to the item with the given id.
    ///
    /// The in-memory store is updated first; the matching persistence call
    /// (snapshot write or PATCH) then runs in the background with failures
    /// logged only. The PATCH body carries the full post-update item, not
    /// just the changed fields. An unknown id is a no-op and dispatches
    /// nothing.
    ///
    /// # Returns
    /// The updated item, or `None` when no item matches
    pub async fn update_item(&self, id: i64, args: UpdateItemArgs) -> Result<Option<TodoItem>> {
        let updated = match self.store.lock().await.apply_patch(id, &args) {
            Some(item) => item,
            None => return Ok(None),
        };

        match self.persistence.as_ref() {
            Persistence::Local(_) => self.persist_snapshot().await,
            Persistence::Remote(backend) => {
                let args = UpdateItemArgs {
                    content: Some(updated.content.clone()),
                    completed: Some(updated.completed),
                    deleted: Some(updated.deleted),
                    sort_order: updated.sort_order,
                };
                self.spawn_update(Arc::clone(backend), id, args).await;
            }
        }

        Ok(Some(updated))
    }

    /// Replace an item's content, applying the same blank rule as add.
    pub async fn set_content(&self, id: i64, content: &str) -> Result<Option<TodoItem>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        let args = UpdateItemArgs {
            content: Some(content.to_string()),
            ..Default::default()
        };
        self.update_item(id, args).await
    }

    /// Flip an item's completed flag.
    pub async fn toggle_completed(&self, id: i64) -> Result<Option<TodoItem>> {
        let completed = match self.store.lock().await.get(id) {
            Some(item) => item.completed,
            None => return Ok(None),
        };
        let args = UpdateItemArgs {
            completed: Some(!completed),
            ..Default::default()
        };
        self.update_item(id, args).await
    }

    /// Flip an item's deleted flag, moving it into or out of the trash.
    pub async fn toggle_deleted(&self, id: i64) -> Result<Option<TodoItem>> {
        let deleted = match self.store.lock().await.get(id) {
            Some(item) => item.deleted,
            None => return Ok(None),
        };
        let args = UpdateItemArgs {
            deleted: Some(!deleted),
            ..Default::default()
        };
        self.update_item(id, args).await
    }

    /// Move the visible item at `from` to `to` within the current filter
    /// view and recompute each visible item's `sort_order` as its new
    /// 1-based position.
    ///
    /// With the remote strategy every repositioned item gets its own
    /// background PATCH carrying the new `sort_order`; the calls are
    /// independent, unordered, and may fail independently without rolling
    /// back the in-memory order. The local strategy writes one snapshot.
    ///
    /// # Returns
    /// The visible items in their new order, empty when either index was
    /// out of bounds
    pub async fn reorder(&self, from: usize, to: usize) -> Result<Vec<TodoItem>> {
        let mode = *self.filter.lock().await;
        let changed = self.store.lock().await.reorder(from, to, mode);
        if changed.is_empty() {
            return Ok(Vec::new());
        }

        match self.persistence.as_ref() {
            Persistence::Local(_) => self.persist_snapshot().await,
            Persistence::Remote(backend) => {
                info!("🔄 Persisting order for {} items", changed.len());
                for item in &changed {
                    let args = UpdateItemArgs {
                        sort_order: item.sort_order,
                        ..Default::default()
                    };
                    self.spawn_update(Arc::clone(backend), item.id, args).await;
                }
            }
        }

        Ok(changed)
    }

    /// Purge every soft-deleted item.
    ///
    /// With the remote strategy one delete call is issued per soft-deleted
    /// item and all of them are awaited before the in-memory collection
    /// changes: if any delete fails the visible list stays as it was, with
    /// each failure logged (the backend may then hold a partial result).
    /// The local strategy purges immediately and writes one snapshot.
    ///
    /// # Returns
    /// The number of items removed from the in-memory collection
    pub async fn empty_trash(&self) -> Result<usize> {
        match self.persistence.as_ref() {
            Persistence::Local(_) => {
                let removed = self.store.lock().await.purge_deleted();
                if !removed.is_empty() {
                    info!("✅ Emptied trash ({} items)", removed.len());
                    self.persist_snapshot().await;
                }
                Ok(removed.len())
            }
            Persistence::Remote(backend) => {
                let doomed = self.store.lock().await.deleted_items();
                if doomed.is_empty() {
                    return Ok(0);
                }

                info!("🔄 Deleting {} items via backend...", doomed.len());
                let mut handles = Vec::with_capacity(doomed.len());
                for item in &doomed {
                    let backend = Arc::clone(backend);
                    let id = item.id;
                    handles.push(tokio::spawn(async move {
                        backend.delete_item(id).await.map_err(|e| (id, e))
                    }));
                }

                let mut all_ok = true;
                for handle in handles {
                    match handle.await {
                        Ok(Ok(())) => {}
                        Ok(Err((id, e))) => {
                            error!("❌ Failed to delete item {id}: {e}");
                            all_ok = false;
                        }
                        Err(e) => {
                            error!("❌ Delete task failed: {e}");
                            all_ok = false;
                        }
                    }
                }
                if !all_ok {
                    return Ok(0);
                }

                let removed = self.store.lock().await.purge_deleted();
                info!("✅ Emptied trash ({} items)", removed.len());
                Ok(removed.len())
            }
        }
    }

    /// Number of background persistence tasks still running.
    pub async fn pending_ops(&self) -> usize {
        let mut pending = self.pending.lock().await;
        pending.retain(|handle| !handle.is_finished());
        pending.len()
    }

    /// Wait for every background persistence task spawned so far.
    ///
    /// Intended for embedder shutdown and tests; it adds no ordering
    /// between the tasks themselves.
    pub async fn wait_idle(&self) {
        loop {
            let handles: Vec<JoinHandle<()>> = {
                let mut pending = self.pending.lock().await;
                pending.drain(..).collect()
            };
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                let _ = handle.await;
            }
        }
    }

    /// Spawn a background snapshot write of the current collection.
    ///
    /// Writes are serialized in mutation order: the write slot is claimed
    /// before the task is spawned and held until its save finishes, so the
    /// snapshot on disk always settles to the newest collection state.
    async fn persist_snapshot(&self) {
        if let Persistence::Local(local) = self.persistence.as_ref() {
            let guard = Arc::clone(&self.save_lock).lock_owned().await;
            let items = self.store.lock().await.items().to_vec();
            let local = local.clone();
            let handle = tokio::spawn(async move {
                let _guard = guard;
                match local.save(&items) {
                    Ok(()) => info!("💾 Saved {} items to snapshot", items.len()),
                    Err(e) => error!("❌ Failed to save snapshot: {e}"),
                }
            });
            self.pending.lock().await.push(handle);
        }
    }

    /// Spawn a background PATCH for one item.
    async fn spawn_update(&self, backend: Arc<dyn Backend>, id: i64, args: UpdateItemArgs) {
        let handle = tokio::spawn(async move {
            match backend.update_item(id, args).await {
                Ok(_) => info!("✅ Updated item {id} via backend"),
                Err(e) => error!("❌ Failed to update item {id}: {e}"),
            }
        });
        self.pending.lock().await.push(handle);
    }
}
