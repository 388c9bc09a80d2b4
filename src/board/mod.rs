//! Board state engine
//!
//! All board logic lives here. Operations are synchronous and report
//! whether they mutated anything:
//! - No global state, the [`Board`] is passed around explicitly
//! - Seeded RNG only
//! - Unknown ids are no-ops, never errors

pub mod mutate;
pub mod shuffle;
pub mod sort;
pub mod state;

pub use mutate::{CardEdit, CardMove};
pub use shuffle::ShuffleMode;
pub use state::{Board, Card, Change, Clock, Column, SortType, Timestamp};
