//! Kanboard - state engine for a single-user kanban board
//!
//! Core modules:
//! - `board`: Columns, cards and every operation that mutates them
//! - `persistence`: Snapshot export/import and JSON encoding
//! - `platform`: Browser/native platform abstraction (storage, time, logging)
//! - `settings`: User-tunable configuration
//! - `app`: Application context that owns the board and saves it
//! - `web`: JS bindings for the browser build

pub mod app;
pub mod board;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod web;

pub use app::App;
pub use board::{Board, Card, CardEdit, CardMove, Change, Column, ShuffleMode, SortType};
pub use error::{KanboardError, Result};
pub use settings::Settings;

/// Board configuration constants
pub mod consts {
    /// Storage key holding the serialized column array
    pub const BOARD_STORAGE_KEY: &str = "kanboardData";
    /// Storage key holding the serialized settings
    pub const SETTINGS_STORAGE_KEY: &str = "kanboard_settings";

    /// Chance that a card shuffle pools cards across all editable columns
    pub const OVERALL_SHUFFLE_CHANCE: f64 = 0.1;

    /// Titles of the columns installed when no snapshot exists
    pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["Todo", "in progress", "done"];

    /// Directory used by the native binary when `KANBOARD_DATA_DIR` is unset
    pub const DEFAULT_DATA_DIR: &str = ".kanboard";
}
