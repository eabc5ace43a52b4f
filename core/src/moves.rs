use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::*;

/// What a logged click hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    Mine,
    Safe,
}

/// One logged click, in board coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub row: Coord,
    pub col: Coord,
    pub result: MoveResult,
}

/// Append-only list of clicks in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, row: Coord, col: Coord, result: MoveResult) {
        log::trace!("Move {}: {}x{} {:?}", self.moves.len() + 1, row, col, result);
        self.moves.push(Move { row, col, result });
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Snapshots the log together with the game metadata.
    pub fn to_record(
        &self,
        player_name: &str,
        board: Board,
        mine_count: CellCount,
        outcome: Outcome,
        timestamp: OffsetDateTime,
    ) -> GameRecord {
        GameRecord {
            player_name: player_name.to_owned(),
            width: board.width(),
            height: board.height(),
            mine_count,
            outcome,
            timestamp,
            moves: self.moves.clone(),
        }
    }
}
