use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use moves::*;
pub use record::*;
pub use replay::*;
pub use session::*;
pub use store::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod moves;
mod record;
mod replay;
mod session;
mod store;
mod types;

/// Board dimensions, cells are addressed row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: Coord,
    height: Coord,
}

impl Board {
    /// Both sides must be positive and the board at most [`MAX_CELLS`] cells.
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        let board = Self { width, height };
        if width == 0 || height == 0 || board.total_cells() > MAX_CELLS {
            return Err(GameError::InvalidDimensions);
        }
        Ok(board)
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    /// `(rows, cols)`, the shape of the cell grid.
    pub const fn bounds(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.width as CellCount * self.height as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.height && coords.1 < self.width {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        if index >= self.total_cells() {
            return Err(GameError::InvalidCoords);
        }
        let width = CellIndex::from(self.width);
        let row: Coord = (index / width).try_into().map_err(|_| GameError::InvalidCoords)?;
        let col: Coord = (index % width).try_into().map_err(|_| GameError::InvalidCoords)?;
        Ok((row, col))
    }

    pub const fn index_of(&self, (row, col): Coord2) -> CellIndex {
        row as CellIndex * self.width as CellIndex + col as CellIndex
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.bounds())
    }
}

/// Preset board sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: Board,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let board = Board::new(width, height)?;
        if mines >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { board, mines })
    }

    pub const fn preset(difficulty: Difficulty) -> Self {
        let (width, height, mines) = match difficulty {
            Difficulty::Beginner => (9, 9, 10),
            Difficulty::Intermediate => (16, 16, 40),
            Difficulty::Expert => (30, 16, 99),
        };
        Self {
            board: Board { width, height },
            mines,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        self.board.total_cells()
    }
}

/// Distinct mine positions as linear cell indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MineSet(BTreeSet<CellIndex>);

impl MineSet {
    /// Builds a set from indices, rejecting out of range ones and boards with no safe cell left.
    pub fn from_indices(
        total_cells: CellCount,
        indices: impl IntoIterator<Item = CellIndex>,
    ) -> Result<Self> {
        let mut mines = BTreeSet::new();
        for index in indices {
            if index >= total_cells {
                return Err(GameError::InvalidCoords);
            }
            mines.insert(index);
        }
        if mines.len() >= total_cells as usize {
            return Err(GameError::TooManyMines);
        }
        Ok(Self(mines))
    }

    pub(crate) fn insert(&mut self, index: CellIndex) -> bool {
        self.0.insert(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.0.iter().copied()
    }
}

/// A board together with where its mines are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minefield {
    board: Board,
    mines: MineSet,
}

impl Minefield {
    pub fn new(board: Board, mines: MineSet) -> Result<Self> {
        let total_cells = board.total_cells();
        if mines.iter().any(|index| index >= total_cells) {
            return Err(GameError::InvalidCoords);
        }
        if mines.len() >= total_cells as usize {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { board, mines })
    }

    pub fn from_mine_indices(board: Board, indices: &[CellIndex]) -> Result<Self> {
        let mines = MineSet::from_indices(board.total_cells(), indices.iter().copied())?;
        Ok(Self { board, mines })
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn mines(&self) -> &MineSet {
        &self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.board.total_cells() - self.mine_count()
    }

    /// False for coordinates off the board.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.board
            .validate_coords(coords)
            .is_ok_and(|coords| self.mines.contains(self.board.index_of(coords)))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.board
            .iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.board.iter_neighbors(coords)
    }
}

/// Result of clicking a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell held a mine, the game is lost.
    Mine,
    /// The cell was safe and is now revealed with this many adjacent mines.
    SafeRevealed(u8),
    /// The cell was already open, nothing changed.
    AlreadyRevealed,
    /// The game already ended, nothing changed.
    GameOver,
}
