//! Browser bindings
//!
//! `start` runs when the wasm module loads; JS then creates a `WebBoard`,
//! which restores the board from LocalStorage and saves after every
//! mutating call. Mutating methods return whether anything changed.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::app::{App, Outcome};
use crate::board::{Board, CardEdit, CardMove, Change};
use crate::persistence;
use crate::platform::Storage;
use crate::settings::Settings;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    crate::platform::init_logging();
    log::info!("Kanboard starting...");
}

/// A board bound to browser storage
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct WebBoard {
    app: App,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl WebBoard {
    /// Open `window.localStorage` and restore the saved board
    #[wasm_bindgen(constructor)]
    pub fn open() -> Result<WebBoard, String> {
        let storage = crate::platform::LocalStorage::open().map_err(|e| e.to_string())?;
        let settings = Settings::load(&storage);
        Ok(Self::with_storage(settings, Box::new(storage)))
    }
}

impl WebBoard {
    /// Restore a board from any storage backend
    pub fn with_storage(settings: Settings, storage: Box<dyn Storage>) -> Self {
        let mut app = App::new(settings, storage);
        app.restore_data();
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    fn run<R, F>(&mut self, op: F) -> Result<R, String>
    where
        R: Outcome,
        F: FnOnce(&mut Board) -> R,
    {
        self.app.apply(op).map_err(|e| {
            log::warn!("Board change not saved: {}", e);
            e.to_string()
        })
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl WebBoard {
    /// Columns as the stored JSON array
    pub fn data(&self) -> Result<String, String> {
        persistence::encode_snapshot(self.app.board().columns()).map_err(|e| e.to_string())
    }

    pub fn add_column(&mut self) -> Result<u64, String> {
        self.run(|b| b.add_column())
    }

    pub fn delete_column(&mut self, column_id: u64) -> Result<bool, String> {
        self.run(|b| b.delete_column(column_id)).map(Change::is_mutated)
    }

    pub fn rename_column(&mut self, column_id: u64, title: String) -> Result<bool, String> {
        self.run(|b| b.rename_column(column_id, title))
            .map(Change::is_mutated)
    }

    pub fn add_new_card(&mut self, column_id: u64) -> Result<Option<u64>, String> {
        self.run(|b| b.add_new_card(column_id))
    }

    pub fn delete_card(&mut self, column_id: u64, card_id: u64) -> Result<bool, String> {
        self.run(|b| b.delete_card(column_id, card_id))
            .map(Change::is_mutated)
    }

    pub fn clear_all_cards(&mut self, column_id: u64) -> Result<bool, String> {
        self.run(|b| b.clear_all_cards(column_id)).map(Change::is_mutated)
    }

    pub fn toggle_editing(&mut self, column_id: u64, value: Option<bool>) -> Result<bool, String> {
        self.run(|b| b.toggle_editing(column_id, value))
            .map(Change::is_mutated)
    }

    pub fn toggle_editing_all(&mut self) -> Result<bool, String> {
        self.run(|b| b.toggle_editing_all()).map(Change::is_mutated)
    }

    pub fn move_card(
        &mut self,
        from_column_id: u64,
        card_id: u64,
        to_column_id: u64,
        position: usize,
    ) -> Result<bool, String> {
        let mv = CardMove {
            from_column_id,
            card_id,
            to_column_id,
            position,
        };
        self.run(|b| b.move_card(mv)).map(Change::is_mutated)
    }

    pub fn handle_card_updated(&mut self, column_id: u64, card_id: u64) -> Result<bool, String> {
        self.run(|b| b.handle_card_updated(column_id, card_id))
            .map(Change::is_mutated)
    }

    pub fn update_card(
        &mut self,
        column_id: u64,
        card_id: u64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<bool, String> {
        let edit = CardEdit { title, content };
        self.run(|b| b.update_card(column_id, card_id, edit))
            .map(Change::is_mutated)
    }

    pub fn shuffle_columns(&mut self) -> Result<bool, String> {
        self.run(|b| b.shuffle_columns()).map(Change::is_mutated)
    }

    pub fn shuffle_cards(&mut self) -> Result<bool, String> {
        self.run(|b| b.shuffle_cards()).map(Change::is_mutated)
    }

    pub fn sort_cards(&mut self, column_id: u64) -> Result<bool, String> {
        self.run(|b| b.sort_cards(column_id)).map(Change::is_mutated)
    }

    /// Save a change held back by the debounce window
    pub fn flush(&mut self) -> Result<(), String> {
        self.app.flush().map_err(|e| e.to_string())
    }
}
