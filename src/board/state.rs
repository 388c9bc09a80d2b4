//! Board state and core entity types
//!
//! Everything that is persisted lives in [`Column`] and [`Card`]. The
//! [`Board`] owns the column collection together with the id counter, the
//! RNG and the clock used to stamp `updated` fields.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::OVERALL_SHUFFLE_CHANCE;
use crate::platform::time;
use crate::settings::Settings;

/// Millisecond timestamp
pub type Timestamp = f64;

/// Clock used to stamp `updated` fields
pub type Clock = fn() -> Timestamp;

/// Per-column sort label, cycled by [`Board::sort_cards`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortType {
    /// Next state in the `none -> asc -> desc -> none` cycle
    pub fn next(self) -> Self {
        match self {
            SortType::None => SortType::Asc,
            SortType::Asc => SortType::Desc,
            SortType::Desc => SortType::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::None => "none",
            SortType::Asc => "asc",
            SortType::Desc => "desc",
        }
    }
}

/// A single card, owned by exactly one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Mirrors the owning column's `can_edit`
    pub can_edit: bool,
    /// Set on creation, cleared by the first committed edit
    #[serde(default)]
    pub is_new: bool,
    /// Sort key
    #[serde(default)]
    pub updated: Timestamp,
}

impl Card {
    /// Create an uncommitted card
    pub fn new(id: u64, can_edit: bool, updated: Timestamp) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            can_edit,
            is_new: true,
            updated,
        }
    }
}

/// An ordered container of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: u64,
    pub title: String,
    /// Card order is the only notion of rank inside a column
    pub cards: Vec<Card>,
    #[serde(default)]
    pub updated: Timestamp,
    pub can_edit: bool,
    #[serde(default)]
    pub sort_type: SortType,
}

impl Column {
    /// Create an empty, editable column
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cards: Vec::new(),
            updated: 0.0,
            can_edit: true,
            sort_type: SortType::None,
        }
    }

    pub fn card(&self, card_id: u64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: u64) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    pub fn card_index(&self, card_id: u64) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    /// Record a change to card order or membership
    pub fn mark_reordered(&mut self, now: Timestamp) {
        self.updated = now;
        self.sort_type = SortType::None;
    }

    /// Drop every card that was never committed. Returns how many were dropped.
    pub fn discard_uncommitted(&mut self) -> usize {
        let before = self.cards.len();
        self.cards.retain(|c| !c.is_new);
        before - self.cards.len()
    }

    /// Copy the column's edit permission onto its committed cards
    pub fn propagate_edit_permission(&mut self) {
        let can_edit = self.can_edit;
        for card in self.cards.iter_mut().filter(|c| !c.is_new) {
            card.can_edit = can_edit;
        }
    }
}

/// Outcome of a board operation
///
/// `Unchanged` means the operation was abandoned (unknown id or nothing to
/// act on); callers only need to save after `Mutated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Mutated,
    Unchanged,
}

impl Change {
    pub fn is_mutated(self) -> bool {
        self == Change::Mutated
    }

    /// Combine two outcomes, mutated if either was
    pub fn or(self, other: Change) -> Change {
        if self.is_mutated() || other.is_mutated() {
            Change::Mutated
        } else {
            Change::Unchanged
        }
    }
}

impl From<bool> for Change {
    fn from(mutated: bool) -> Self {
        if mutated {
            Change::Mutated
        } else {
            Change::Unchanged
        }
    }
}

/// The live board: columns plus the machinery that mutates them
#[derive(Debug)]
pub struct Board {
    pub(crate) columns: Vec<Column>,
    /// Next id handed out to a column or card
    next_id: u64,
    /// The counter ran past `u64::MAX`; ids must be checked against the board
    ids_wrapped: bool,
    pub(crate) rng: Pcg32,
    pub(crate) overall_shuffle_chance: f64,
    clock: Clock,
}

impl Board {
    /// Create an empty board with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            columns: Vec::new(),
            next_id: 1,
            ids_wrapped: false,
            rng: Pcg32::seed_from_u64(seed),
            overall_shuffle_chance: OVERALL_SHUFFLE_CHANCE,
            clock: time::now_ms,
        }
    }

    /// Create an empty board configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::debug!("Board RNG seeded with {}", seed);
        let mut board = Self::new(seed);
        board.overall_shuffle_chance = settings.effective_overall_shuffle_chance();
        board
    }

    /// Replace the clock used for `updated` stamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Override the overall-mode shuffle probability (clamped to [0, 1])
    pub fn with_overall_shuffle_chance(mut self, chance: f64) -> Self {
        self.overall_shuffle_chance = Settings::clamp_chance(chance);
        self
    }

    /// Current time according to the board's clock
    pub fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// Allocate a new id, unique across columns and cards
    pub fn next_entity_id(&mut self) -> u64 {
        loop {
            let id = self.next_id;
            match id.checked_add(1) {
                Some(next) => self.next_id = next,
                None => {
                    self.next_id = 1;
                    self.ids_wrapped = true;
                }
            }
            if !self.ids_wrapped || !self.id_in_use(id) {
                return id;
            }
        }
    }

    fn id_in_use(&self, id: u64) -> bool {
        self.columns
            .iter()
            .any(|col| col.id == id || col.card(id).is_some())
    }

    /// Move the id counter past every id currently on the board
    pub(crate) fn reseed_ids(&mut self) {
        let max_id = self
            .columns
            .iter()
            .flat_map(|col| std::iter::once(col.id).chain(col.cards.iter().map(|c| c.id)))
            .max()
            .unwrap_or(0);
        match max_id.checked_add(1) {
            Some(next) => {
                self.next_id = next;
                self.ids_wrapped = false;
            }
            None => {
                self.next_id = 1;
                self.ids_wrapped = true;
            }
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: u64) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub(crate) fn column_mut(&mut self, id: u64) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn column_index(&self, id: u64) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn card(&self, column_id: u64, card_id: u64) -> Option<&Card> {
        self.column(column_id).and_then(|col| col.card(card_id))
    }

    /// Locate a card anywhere on the board, returning its column id
    pub fn find_card(&self, card_id: u64) -> Option<(u64, &Card)> {
        self.columns
            .iter()
            .find_map(|col| col.card(card_id).map(|card| (col.id, card)))
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}
