use ndarray::Array2;

use crate::*;

/// Minefield plus the player-visible grid, handles reveals and flood fill.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayField {
    minefield: Minefield,
    cells: Array2<Cell>,
    revealed_count: CellCount,
}

impl PlayField {
    pub fn new(minefield: Minefield) -> Self {
        let bounds = minefield.board().bounds();
        Self {
            minefield,
            cells: Array2::default(grid_index(bounds)),
            revealed_count: 0,
        }
    }

    pub fn board(&self) -> Board {
        self.minefield.board()
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// `None` for coordinates off the board.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(grid_index(coords)).copied()
    }

    fn set_cell(&mut self, coords: Coord2, state: Cell) -> bool {
        match self.cells.get_mut(grid_index(coords)) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.minefield.contains_mine(coords)
    }

    /// Revealed safe cells, an exploded mine is not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_won(&self) -> bool {
        self.revealed_count == self.minefield.safe_cell_count()
    }

    /// Reveals the cell at `index`, flooding out from it when it has no adjacent mines.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let coords = self.board().coords_of(index)?;
        Ok(self.reveal_at(coords))
    }

    pub(crate) fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        match (self.cell_at(coords), self.has_mine_at(coords)) {
            (Some(Cell::Hidden), true) => {
                self.set_cell(coords, Cell::Exploded);
                log::debug!("Mine hit at {:?}", coords);
                RevealOutcome::Mine
            }
            (Some(Cell::Hidden), false) => {
                let adjacent_mines = self.open_safe_cell(coords);
                log::debug!("Open cell at {:?}, mine count: {}", coords, adjacent_mines);

                if adjacent_mines == 0 {
                    self.flood_fill(coords);
                }
                RevealOutcome::SafeRevealed(adjacent_mines)
            }
            _ => RevealOutcome::AlreadyRevealed,
        }
    }

    fn open_safe_cell(&mut self, coords: Coord2) -> u8 {
        let adjacent_mines = self.minefield.adjacent_mine_count(coords);
        if self.set_cell(coords, Cell::Revealed(adjacent_mines)) {
            self.revealed_count += 1;
        }
        adjacent_mines
    }

    /// Opens every hidden cell connected to `origin` through zero-count cells.
    ///
    /// Only hidden cells are queued and each is opened before its neighbors are looked at, so the
    /// revealed state doubles as the visited set.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = self.hidden_safe_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop() {
            if self.cell_at(visit_coords) != Some(Cell::Hidden) {
                continue;
            }

            let visit_count = self.open_safe_cell(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                visit_count
            );

            if visit_count == 0 {
                let next: Vec<_> = self.hidden_safe_neighbors(visit_coords).collect();
                to_visit.extend(next);
            }
        }
    }

    fn hidden_safe_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.minefield
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos) == Some(Cell::Hidden) && !self.has_mine_at(pos))
    }
}

/// Whether every cell is either a mine or revealed.
pub fn is_won(cells: &Array2<Cell>, minefield: &Minefield) -> bool {
    let board = minefield.board();
    cells.indexed_iter().all(|((row, col), cell)| {
        // grid shape comes from the board, so both fit in a coordinate
        let coords = (row as Coord, col as Coord);
        cell.is_revealed() || minefield.mines().contains(board.index_of(coords))
    })
}
