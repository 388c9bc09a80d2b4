//! Snapshot export/import and storage encoding
//!
//! Features:
//! - Deep-copy snapshots that share nothing with the live board
//! - Default seed when no snapshot exists
//! - JSON array of columns as the stored format
//! - Boards with non-integer ids are imported and renumbered
//! - Corrupt data is treated as missing data

use serde::Deserialize;

use crate::board::{Board, Card, Column, SortType, Timestamp};
use crate::consts::DEFAULT_COLUMN_TITLES;
use crate::error::Result;
use crate::platform::Storage;

impl Board {
    /// Independent copy of every column and card
    pub fn get_data(&self) -> Vec<Column> {
        self.columns.clone()
    }

    /// Install a snapshot, or the default columns when it is missing or empty.
    ///
    /// The snapshot is trusted as-is; nothing beyond its shape is validated.
    pub fn restore_data(&mut self, snapshot: Option<Vec<Column>>) {
        match snapshot {
            Some(columns) if !columns.is_empty() => {
                log::info!("Restored board with {} columns", columns.len());
                self.columns = columns;
                self.reseed_ids();
            }
            _ => {
                self.columns.clear();
                self.reseed_ids();
                for title in DEFAULT_COLUMN_TITLES {
                    let id = self.next_entity_id();
                    self.columns.push(Column::new(id, title));
                }
                log::info!("Seeded default board");
            }
        }
    }
}

/// Serialize columns to the stored JSON format
pub fn encode_snapshot(columns: &[Column]) -> Result<String> {
    Ok(serde_json::to_string(columns)?)
}

/// Parse the stored JSON format.
///
/// Snapshots whose ids are not unsigned integers (e.g. `1712345678901.25`)
/// are accepted too; every column and card then gets a fresh id in
/// document order.
pub fn decode_snapshot(json: &str) -> Result<Vec<Column>> {
    match serde_json::from_str(json) {
        Ok(columns) => Ok(columns),
        Err(strict) => match serde_json::from_str::<Vec<ImportedColumn>>(json) {
            Ok(imported) => {
                log::info!("Renumbering ids of imported board ({} columns)", imported.len());
                Ok(renumber(imported))
            }
            Err(_) => Err(strict.into()),
        },
    }
}

/// Column with any numeric id
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedColumn {
    #[allow(dead_code)]
    id: f64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    cards: Vec<ImportedCard>,
    #[serde(default)]
    updated: Timestamp,
    #[serde(default = "editable")]
    can_edit: bool,
    #[serde(default)]
    sort_type: SortType,
}

/// Card with any numeric id
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedCard {
    #[allow(dead_code)]
    id: f64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default = "editable")]
    can_edit: bool,
    #[serde(default)]
    is_new: bool,
    #[serde(default)]
    updated: Timestamp,
}

fn editable() -> bool {
    true
}

fn renumber(imported: Vec<ImportedColumn>) -> Vec<Column> {
    let mut next_id = 0u64;
    let mut fresh_id = || {
        next_id += 1;
        next_id
    };

    imported
        .into_iter()
        .map(|col| Column {
            id: fresh_id(),
            title: col.title,
            cards: col
                .cards
                .into_iter()
                .map(|card| Card {
                    id: fresh_id(),
                    title: card.title,
                    content: card.content,
                    can_edit: card.can_edit,
                    is_new: card.is_new,
                    updated: card.updated,
                })
                .collect(),
            updated: col.updated,
            can_edit: col.can_edit,
            sort_type: col.sort_type,
        })
        .collect()
}

/// What storage holds under the board key
#[derive(Debug, Clone, PartialEq)]
pub enum StoredBoard {
    /// Nothing was ever saved
    Absent,
    /// Something is stored but could not be read or parsed
    Unreadable,
    Columns(Vec<Column>),
}

/// Read a snapshot from storage
pub fn load_snapshot(storage: &dyn Storage, key: &str) -> StoredBoard {
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No saved board found, starting fresh");
            return StoredBoard::Absent;
        }
        Err(e) => {
            log::warn!("Could not read saved board: {}", e);
            return StoredBoard::Unreadable;
        }
    };

    match decode_snapshot(&json) {
        Ok(columns) => StoredBoard::Columns(columns),
        Err(e) => {
            log::warn!("Discarding unreadable saved board: {}", e);
            StoredBoard::Unreadable
        }
    }
}

/// Write a snapshot to storage
pub fn save_snapshot(storage: &mut dyn Storage, key: &str, columns: &[Column]) -> Result<()> {
    let json = encode_snapshot(columns)?;
    storage.set(key, &json)?;
    log::debug!("Board saved ({} columns, {} bytes)", columns.len(), json.len());
    Ok(())
}
