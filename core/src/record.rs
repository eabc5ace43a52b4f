use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::*;

/// Identifier handed out by a [`RecordStore`] when a game is saved.
pub type RecordId = u64;

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Persisted summary of one finished game, including every logged move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub player_name: String,
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
    pub outcome: Outcome,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub moves: Vec<Move>,
}

/// A record as handed back by a store, with the id it was saved under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: GameRecord,
}
