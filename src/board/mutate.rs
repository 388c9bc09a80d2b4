//! Column and card CRUD
//!
//! Unknown ids never fail loudly: the operation is abandoned and reported
//! as [`Change::Unchanged`].

use serde::{Deserialize, Serialize};

use super::state::{Board, Card, Change, Column};

/// Request to move a card, possibly within the same column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMove {
    pub from_column_id: u64,
    pub card_id: u64,
    pub to_column_id: u64,
    /// Insertion index, clamped to the destination length
    pub position: usize,
}

/// Fields written by the inline card editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEdit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Board {
    /// Append a blank editable column and return its id
    pub fn add_column(&mut self) -> u64 {
        let id = self.next_entity_id();
        self.columns.push(Column::new(id, ""));
        log::debug!("Added column {}", id);
        id
    }

    pub fn delete_column(&mut self, column_id: u64) -> Change {
        let Some(index) = self.column_index(column_id) else {
            return Change::Unchanged;
        };
        let column = self.columns.remove(index);
        log::debug!("Deleted column {} ({} cards)", column.id, column.cards.len());
        Change::Mutated
    }

    pub fn rename_column(&mut self, column_id: u64, title: impl Into<String>) -> Change {
        let now = self.now();
        let Some(column) = self.column_mut(column_id) else {
            return Change::Unchanged;
        };
        column.title = title.into();
        column.updated = now;
        Change::Mutated
    }

    /// Append an uncommitted card to a column, returning its id
    pub fn add_new_card(&mut self, column_id: u64) -> Option<u64> {
        self.column_index(column_id)?;
        let id = self.next_entity_id();
        let now = self.now();
        let column = self.column_mut(column_id)?;
        column.cards.push(Card::new(id, column.can_edit, now));
        column.mark_reordered(now);
        log::debug!("Added card {} to column {}", id, column_id);
        Some(id)
    }

    pub fn delete_card(&mut self, column_id: u64, card_id: u64) -> Change {
        let now = self.now();
        let Some(column) = self.column_mut(column_id) else {
            return Change::Unchanged;
        };
        let Some(index) = column.card_index(card_id) else {
            return Change::Unchanged;
        };
        column.cards.remove(index);
        column.mark_reordered(now);
        Change::Mutated
    }

    pub fn clear_all_cards(&mut self, column_id: u64) -> Change {
        let now = self.now();
        let Some(column) = self.column_mut(column_id) else {
            return Change::Unchanged;
        };
        column.cards.clear();
        column.mark_reordered(now);
        Change::Mutated
    }

    /// Set (or flip) a column's edit permission.
    ///
    /// Uncommitted cards are discarded first, then the new permission is
    /// copied onto every remaining card.
    pub fn toggle_editing(&mut self, column_id: u64, value: Option<bool>) -> Change {
        let now = self.now();
        let Some(column) = self.column_mut(column_id) else {
            return Change::Unchanged;
        };
        column.can_edit = value.unwrap_or(!column.can_edit);

        if column.discard_uncommitted() > 0 {
            column.mark_reordered(now);
        }
        column.propagate_edit_permission();
        log::debug!("Column {} editing: {}", column_id, column.can_edit);
        Change::Mutated
    }

    /// Lock editing on every column
    pub fn toggle_editing_all(&mut self) -> Change {
        let ids: Vec<u64> = self.columns.iter().map(|c| c.id).collect();
        ids.into_iter().fold(Change::Unchanged, |change, id| {
            change.or(self.toggle_editing(id, Some(false)))
        })
    }

    /// Move a card between (or within) columns.
    ///
    /// Either the whole move happens or nothing changes.
    pub fn move_card(&mut self, mv: CardMove) -> Change {
        let (Some(from), Some(to)) = (
            self.column_index(mv.from_column_id),
            self.column_index(mv.to_column_id),
        ) else {
            return Change::Unchanged;
        };
        let Some(card_index) = self.columns[from].card_index(mv.card_id) else {
            return Change::Unchanged;
        };

        let now = self.now();
        let card = self.columns[from].cards.remove(card_index);
        self.columns[from].mark_reordered(now);

        let dest = &mut self.columns[to];
        let position = mv.position.min(dest.cards.len());
        dest.cards.insert(position, card);
        dest.mark_reordered(now);

        log::debug!(
            "Moved card {} from column {} to column {} at {}",
            mv.card_id,
            mv.from_column_id,
            mv.to_column_id,
            position
        );
        Change::Mutated
    }

    /// Commit an edit: stamp the column and card, clear `is_new`
    pub fn handle_card_updated(&mut self, column_id: u64, card_id: u64) -> Change {
        let now = self.now();
        let Some(column) = self.column_mut(column_id) else {
            return Change::Unchanged;
        };
        column.updated = now;
        if let Some(card) = column.card_mut(card_id) {
            card.updated = now;
            card.is_new = false;
        }
        Change::Mutated
    }

    /// Write editor fields into a card and commit it
    pub fn update_card(&mut self, column_id: u64, card_id: u64, edit: CardEdit) -> Change {
        let Some(card) = self
            .column_mut(column_id)
            .and_then(|col| col.card_mut(card_id))
        else {
            return Change::Unchanged;
        };
        if let Some(title) = edit.title {
            card.title = title;
        }
        if let Some(content) = edit.content {
            card.content = content;
        }
        self.handle_card_updated(column_id, card_id)
    }
}
