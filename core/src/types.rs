/// Single coordinate axis used for board width, height, rows and columns.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Linear cell index, `row * width + col`.
pub type CellIndex = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Largest board accepted, in cells.
pub const MAX_CELLS: CellCount = 1 << 20;

/// Position in the `(rows, cols)` shaped cell grid.
pub(crate) fn grid_index((row, col): Coord2) -> (usize, usize) {
    (row.into(), col.into())
}

/// Walks the cells around `center` row by row, clipped to the board so edges never wrap.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last_col: Coord,
    last_row: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, (rows, cols): Coord2) -> Self {
        let (row, col) = center;
        let span = |pos: Coord, len: Coord| {
            (pos.saturating_sub(1), pos.saturating_add(1).min(len.saturating_sub(1)))
        };
        let (first_row, last_row) = span(row, rows);
        let (first_col, last_col) = span(col, cols);

        Self {
            center,
            first_col,
            last_col,
            last_row,
            cursor: (row < rows && col < cols).then_some((first_row, first_col)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((row, col)) = self.cursor {
            self.cursor = if col < self.last_col {
                Some((row, col + 1))
            } else if row < self.last_row {
                Some((row + 1, self.first_col))
            } else {
                None
            };

            if (row, col) != self.center {
                return Some((row, col));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();

        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn left_edge_does_not_wrap_to_previous_row() {
        let neighbors: Vec<_> = NeighborIter::new((1, 0), (3, 3)).collect();

        assert!(!neighbors.contains(&(0, 2)));
        assert!(!neighbors.contains(&(2, 2)));
        assert_eq!(neighbors.len(), 5);
    }

    #[test]
    fn bottom_right_corner_stays_on_board() {
        let neighbors: Vec<_> = NeighborIter::new((1, 3), (2, 4)).collect();

        assert_eq!(neighbors, vec![(0, 2), (0, 3), (1, 2)]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn off_board_center_has_no_neighbors() {
        assert_eq!(NeighborIter::new((5, 0), (3, 3)).next(), None);
    }
}
