//! Taskdeck - an embeddable to-do list engine
//!
//! This library provides the state core of a single-page to-do application:
//! an ordered in-memory item collection, filtered views, interaction
//! operations (add, edit, toggle, reorder, empty-trash), and persistence to
//! either a local snapshot file or a remote REST backend. It ships no UI of
//! its own; an embedding layer maps user events onto [`sync::SyncService`]
//! methods and re-renders from the returned state.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`store`] - In-memory item collection and id counter
//! * [`filter`] - Pure derivation of the visible view
//! * [`storage`] - Local snapshot persistence
//! * [`backend`] - Remote backend abstraction and REST client
//! * [`sync`] - Service keeping store and persistence in sync

/// Backend abstraction layer for remote persistence
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Data models for items and their mutation arguments
pub mod entities;

/// Filter modes and visible-view derivation
pub mod filter;

/// Logging setup routing the log facade through fern
pub mod logger;

/// Local snapshot file persistence
pub mod storage;

/// In-memory item store
pub mod store;

/// Synchronization service tying store, filter, and persistence together
pub mod sync;

// Re-export the core types for convenient access
pub use entities::item::{CreateItemArgs, TodoItem, UpdateItemArgs};
pub use filter::FilterMode;
pub use store::ItemStore;
pub use sync::{Persistence, SyncService};
