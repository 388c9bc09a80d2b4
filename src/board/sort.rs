//! Per-column sort cycle
//!
//! Each call advances `none -> asc -> desc -> none`. The card order follows
//! the label the column ends up with: `asc` sorts oldest first, `desc`
//! newest first, and `none` leaves the current order alone.

use super::state::{Board, Change, SortType};

impl Board {
    /// Advance a column's sort state and reorder its cards by `updated`
    pub fn sort_cards(&mut self, column_id: u64) -> Change {
        let Some(column) = self.column_mut(column_id) else {
            return Change::Unchanged;
        };
        let next = column.sort_type.next();
        column.sort_type = next;

        // `sort_by` is stable, so equal timestamps keep their relative order
        match next {
            SortType::None => {}
            SortType::Asc => column.cards.sort_by(|a, b| a.updated.total_cmp(&b.updated)),
            SortType::Desc => column.cards.sort_by(|a, b| b.updated.total_cmp(&a.updated)),
        }
        log::debug!("Column {} sort: {}", column_id, next.as_str());
        Change::Mutated
    }
}
