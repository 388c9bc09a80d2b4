//! Column and card shuffling
//!
//! All permutations are Fisher-Yates via [`SliceRandom::shuffle`] driven by
//! the board's seeded RNG, so a board built with a fixed seed shuffles
//! reproducibly.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Board, Card, Change};

/// How [`Board::shuffle_cards_with`] redistributes cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    /// Pool every editable card and deal them across editable columns
    Overall,
    /// Reorder each editable column in place
    PerColumn,
}

impl Board {
    /// Permute the column order
    pub fn shuffle_columns(&mut self) -> Change {
        if self.columns.is_empty() {
            return Change::Unchanged;
        }
        self.columns.shuffle(&mut self.rng);
        Change::Mutated
    }

    /// Roll a shuffle mode
    pub fn pick_shuffle_mode(&mut self) -> ShuffleMode {
        if self.rng.random_bool(self.overall_shuffle_chance) {
            ShuffleMode::Overall
        } else {
            ShuffleMode::PerColumn
        }
    }

    /// Shuffle cards of editable columns using a randomly picked mode
    pub fn shuffle_cards(&mut self) -> Change {
        let mode = self.pick_shuffle_mode();
        self.shuffle_cards_with(mode)
    }

    /// Shuffle cards of editable columns using the given mode.
    ///
    /// Columns with `can_edit == false` are never touched.
    pub fn shuffle_cards_with(&mut self, mode: ShuffleMode) -> Change {
        let editable: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| col.can_edit)
            .map(|(i, _)| i)
            .collect();
        if editable.is_empty() {
            return Change::Unchanged;
        }

        match mode {
            ShuffleMode::Overall => {
                let mut pool: Vec<Card> = editable
                    .iter()
                    .flat_map(|&i| std::mem::take(&mut self.columns[i].cards))
                    .collect();
                pool.shuffle(&mut self.rng);

                for card in pool {
                    let target = editable[self.rng.random_range(0..editable.len())];
                    self.columns[target].cards.push(card);
                }
            }
            ShuffleMode::PerColumn => {
                for &i in &editable {
                    self.columns[i].cards.shuffle(&mut self.rng);
                }
            }
        }

        let now = self.now();
        for &i in &editable {
            self.columns[i].mark_reordered(now);
        }
        log::debug!("Shuffled cards ({:?}) in {} columns", mode, editable.len());
        Change::Mutated
    }
}
