use std::fmt;

use minelog_core::{Cell, GameSession};

/// Text rendering of the board, with row and column numbers around it.
///
/// Mines are only drawn once the game has ended.
pub struct BoardView<'a>(pub &'a GameSession);

impl BoardView<'_> {
    fn symbol(&self, coords: (u16, u16)) -> char {
        let session = self.0;
        match session.cell_at(coords).unwrap_or_default() {
            Cell::Exploded => '*',
            Cell::Revealed(0) => '.',
            Cell::Revealed(count) => char::from(b'0' + count),
            Cell::Hidden if session.is_terminal() && session.field().has_mine_at(coords) => 'x',
            Cell::Hidden => '#',
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0.board();
        let label_width = board.height().saturating_sub(1).to_string().len();
        let cell_width = board.width().saturating_sub(1).to_string().len();

        write!(f, "{:label_width$} ", "")?;
        for col in 0..board.width() {
            write!(f, " {:>cell_width$}", col)?;
        }
        writeln!(f)?;

        for row in 0..board.height() {
            write!(f, "{:>label_width$} ", row)?;
            for col in 0..board.width() {
                write!(f, " {:>cell_width$}", self.symbol((row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
