//! Constants used throughout the crate
//!
//! This module centralizes magic strings and default values to improve
//! maintainability and consistency.

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "taskdeck";

/// File name of the local snapshot holding the serialized item collection
pub const SNAPSHOT_FILE_NAME: &str = "todos.json";

/// File name of the log file when file logging is enabled
pub const LOG_FILE_NAME: &str = "taskdeck.log";

/// Default base URL of the remote todos service
pub const DEFAULT_BASE_URL: &str = "http://localhost:3031/api/v1/todos";

// Persistence strategy identifiers accepted by the configuration
pub const STRATEGY_LOCAL: &str = "local";
pub const STRATEGY_REST: &str = "rest";
