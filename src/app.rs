//! Application context
//!
//! Owns the board, its storage and settings. Every board operation goes
//! through [`App::apply`], which saves the board whenever the operation
//! reports a mutation (immediately, or at most once per
//! `save_debounce_ms`).

use crate::board::{Board, Change, Timestamp};
use crate::error::Result;
use crate::persistence::{self, StoredBoard};
use crate::platform::Storage;
use crate::settings::Settings;

/// Anything a board operation can return that tells whether it mutated
pub trait Outcome {
    fn change(&self) -> Change;
}

impl Outcome for Change {
    fn change(&self) -> Change {
        *self
    }
}

/// Operations that create an entity return its id, `None` when abandoned
impl Outcome for Option<u64> {
    fn change(&self) -> Change {
        self.is_some().into()
    }
}

/// `add_column` always creates a column
impl Outcome for u64 {
    fn change(&self) -> Change {
        Change::Mutated
    }
}

pub struct App {
    board: Board,
    storage: Box<dyn Storage>,
    settings: Settings,
    is_data_restored: bool,
    /// Storage held a board that could not be read or parsed
    has_unreadable_data: bool,
    /// A mutation happened that has not reached storage yet
    pending_save: bool,
    last_save: Option<Timestamp>,
}

impl App {
    pub fn new(settings: Settings, storage: Box<dyn Storage>) -> Self {
        Self::with_board(Board::from_settings(&settings), settings, storage)
    }

    /// Use a pre-built board (custom clock or seed)
    pub fn with_board(board: Board, settings: Settings, storage: Box<dyn Storage>) -> Self {
        Self {
            board,
            storage,
            settings,
            is_data_restored: false,
            has_unreadable_data: false,
            pending_save: false,
            last_save: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// True once a stored snapshot was found (even if it had to be discarded)
    pub fn is_data_restored(&self) -> bool {
        self.is_data_restored
    }

    /// True when a mutation is waiting for the debounce window to pass
    pub fn has_pending_save(&self) -> bool {
        self.pending_save
    }

    /// True when the last `restore_data` replaced an unreadable stored board
    /// with defaults. Saving now would overwrite that stored value.
    pub fn has_unreadable_data(&self) -> bool {
        self.has_unreadable_data
    }

    /// Load the board from storage, seeding defaults when nothing usable exists
    pub fn restore_data(&mut self) {
        let stored = persistence::load_snapshot(self.storage.as_ref(), &self.settings.storage_key);
        self.has_unreadable_data = matches!(stored, StoredBoard::Unreadable);
        match stored {
            StoredBoard::Absent => {
                self.board.restore_data(None);
                return;
            }
            StoredBoard::Unreadable => self.board.restore_data(None),
            StoredBoard::Columns(columns) => self.board.restore_data(Some(columns)),
        }
        self.is_data_restored = true;
    }

    /// Serialize the board into storage now
    pub fn save_data(&mut self) -> Result<()> {
        persistence::save_snapshot(
            self.storage.as_mut(),
            &self.settings.storage_key,
            &self.board.get_data(),
        )?;
        self.pending_save = false;
        self.last_save = Some(self.board.now());
        Ok(())
    }

    /// Run a board operation and save if it mutated the board.
    ///
    /// The operation's result is lost when saving fails; use
    /// [`App::apply_and_save`] to keep it. Either way the mutation stays
    /// applied and [`App::flush`] retries the save.
    ///
    /// ```
    /// use kanboard::{App, Settings};
    /// use kanboard::platform::{MemoryStorage, Storage};
    ///
    /// let mut app = App::new(Settings::default(), Box::new(MemoryStorage::new()));
    /// app.restore_data();
    /// let column = app.board().columns()[0].id;
    /// let card = app.apply(|board| board.add_new_card(column)).unwrap();
    /// assert!(card.is_some());
    /// assert!(app.storage().get("kanboardData").unwrap().is_some());
    /// ```
    pub fn apply<R, F>(&mut self, op: F) -> Result<R>
    where
        R: Outcome,
        F: FnOnce(&mut Board) -> R,
    {
        let (result, saved) = self.apply_and_save(op);
        saved.map(|()| result)
    }

    /// Run a board operation, returning its result next to the save outcome
    pub fn apply_and_save<R, F>(&mut self, op: F) -> (R, Result<()>)
    where
        R: Outcome,
        F: FnOnce(&mut Board) -> R,
    {
        let result = op(&mut self.board);
        let saved = if result.change().is_mutated() {
            self.notify_mutated()
        } else {
            Ok(())
        };
        (result, saved)
    }

    fn notify_mutated(&mut self) -> Result<()> {
        self.pending_save = true;
        let debounce = self.settings.save_debounce_ms as f64;
        let due = match self.last_save {
            Some(last) => self.board.now() - last >= debounce,
            None => true,
        };
        if due { self.save_data() } else { Ok(()) }
    }

    /// Save a mutation held back by the debounce window
    pub fn flush(&mut self) -> Result<()> {
        if self.pending_save {
            self.save_data()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CardMove, SortType};
    use crate::error::KanboardError;
    use crate::platform::MemoryStorage;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU64, Ordering};

    static NOW: AtomicU64 = AtomicU64::new(0);

    fn test_clock() -> f64 {
        NOW.load(Ordering::SeqCst) as f64
    }

    fn stored_columns(app: &App) -> Option<Vec<crate::board::Column>> {
        match persistence::load_snapshot(app.storage(), "kanboardData") {
            StoredBoard::Columns(columns) => Some(columns),
            _ => None,
        }
    }

    fn memory_app(storage: MemoryStorage) -> App {
        let settings = Settings {
            seed: Some(1),
            ..Default::default()
        };
        App::new(settings, Box::new(storage))
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(KanboardError::Read {
                key: key.to_string(),
                message: "disk on fire".to_string(),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(KanboardError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_restore_without_data_seeds_defaults() {
        let mut app = memory_app(MemoryStorage::new());
        app.restore_data();
        assert_eq!(app.board().columns().len(), 3);
        assert!(!app.is_data_restored());
    }

    #[test]
    fn test_restore_corrupt_data_seeds_defaults() {
        let mut app = memory_app(MemoryStorage::new().with_entry("kanboardData", "not json"));
        app.restore_data();
        assert_eq!(app.board().columns()[0].title, "Todo");
        assert!(app.is_data_restored());
        assert!(app.has_unreadable_data());
    }

    #[test]
    fn test_restore_imports_fractional_ids() {
        let json = r#"[{"title":"Mine","id":1712345678901.42,"cards":[
            {"title":"keep me","content":"Add content...","canEdit":true,"id":1712345678902.17}
        ],"updated":0,"canEdit":true}]"#;
        let mut app = memory_app(MemoryStorage::new().with_entry("kanboardData", json));
        app.restore_data();

        assert!(!app.has_unreadable_data());
        let col = &app.board().columns()[0];
        assert_eq!(col.title, "Mine");
        assert_eq!(col.cards[0].title, "keep me");

        let (col_id, kept_id) = (col.id, col.cards[0].id);
        let card = app.apply(|b| b.add_new_card(col_id)).unwrap().unwrap();
        assert!(card > kept_id.max(col_id));
    }

    #[test]
    fn test_restore_existing_snapshot() {
        let json = r#"[{"id":4,"title":"Ideas","cards":[],"updated":0,"canEdit":false,"sortType":"desc"}]"#;
        let mut app = memory_app(MemoryStorage::new().with_entry("kanboardData", json));
        app.restore_data();

        let col = &app.board().columns()[0];
        assert_eq!(col.title, "Ideas");
        assert!(!col.can_edit);
        assert_eq!(col.sort_type, SortType::Desc);
    }

    #[test]
    fn test_every_mutation_is_saved() {
        let mut app = memory_app(MemoryStorage::new());
        app.restore_data();
        let todo = app.board().columns()[0].id;
        let done = app.board().columns()[2].id;

        let card = app.apply(|b| b.add_new_card(todo)).unwrap().unwrap();
        assert_eq!(stored_columns(&app).unwrap()[0].cards.len(), 1);

        app.apply(|b| {
            b.move_card(CardMove {
                from_column_id: todo,
                card_id: card,
                to_column_id: done,
                position: 0,
            })
        })
        .unwrap();
        let stored = stored_columns(&app).unwrap();
        assert!(stored[0].cards.is_empty());
        assert_eq!(stored[2].cards[0].id, card);
        assert_eq!(stored.as_slice(), app.board().columns());
    }

    #[test]
    fn test_unchanged_operation_does_not_save() {
        let mut app = memory_app(MemoryStorage::new());
        app.restore_data();
        let change = app.apply(|b| b.delete_column(999)).unwrap();
        assert_eq!(change, Change::Unchanged);
        assert!(stored_columns(&app).is_none());
    }

    #[test]
    fn test_debounced_saves() {
        let settings = Settings {
            seed: Some(1),
            save_debounce_ms: 100,
            ..Default::default()
        };
        let board = Board::from_settings(&settings).with_clock(test_clock);
        let mut app = App::with_board(board, settings, Box::new(MemoryStorage::new()));
        app.restore_data();
        let todo = app.board().columns()[0].id;

        NOW.store(1_000, Ordering::SeqCst);
        app.apply(|b| b.add_new_card(todo)).unwrap();
        assert_eq!(stored_columns(&app).unwrap()[0].cards.len(), 1);

        NOW.store(1_050, Ordering::SeqCst);
        app.apply(|b| b.add_new_card(todo)).unwrap();
        assert!(app.has_pending_save());
        assert_eq!(stored_columns(&app).unwrap()[0].cards.len(), 1);

        app.flush().unwrap();
        assert!(!app.has_pending_save());
        assert_eq!(stored_columns(&app).unwrap()[0].cards.len(), 2);

        NOW.store(1_200, Ordering::SeqCst);
        app.apply(|b| b.add_new_card(todo)).unwrap();
        assert_eq!(stored_columns(&app).unwrap()[0].cards.len(), 3);
    }

    #[test]
    fn test_storage_failures() {
        let mut app = App::new(Settings::default(), Box::new(FailingStorage));
        app.restore_data();
        assert_eq!(app.board().columns().len(), 3);

        let todo = app.board().columns()[0].id;
        let err = app.apply(|b| b.add_new_card(todo)).unwrap_err();
        assert!(matches!(err, KanboardError::Write { .. }));
        assert!(app.has_pending_save());
        assert_eq!(app.board().columns()[0].cards.len(), 1);
    }

    /// Fails writes until told otherwise
    struct FlakyStorage {
        inner: MemoryStorage,
        fail: Rc<Cell<bool>>,
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail.get() {
                return Err(KanboardError::Write {
                    key: key.to_string(),
                    message: "quota exceeded".to_string(),
                });
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_failed_save_keeps_result_and_retries() {
        let fail = Rc::new(Cell::new(true));
        let storage = FlakyStorage {
            inner: MemoryStorage::new(),
            fail: Rc::clone(&fail),
        };
        let mut app = App::new(Settings::default(), Box::new(storage));
        app.restore_data();
        let todo = app.board().columns()[0].id;

        let (card, saved) = app.apply_and_save(|b| b.add_new_card(todo));
        assert!(saved.is_err());
        let card = card.unwrap();
        assert!(app.board().card(todo, card).is_some());
        assert!(app.has_pending_save());

        fail.set(false);
        app.flush().unwrap();
        assert!(!app.has_pending_save());
        assert_eq!(stored_columns(&app).unwrap()[0].cards[0].id, card);
    }
}
