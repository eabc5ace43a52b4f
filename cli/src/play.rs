use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use minelog_core::*;
use time::OffsetDateTime;

use crate::render::BoardView;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Input {
    Click(Coord, Coord),
    Quit,
    Invalid,
}

fn parse_input(line: &str) -> Input {
    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',' || c == 'x');
    let mut next = || parts.by_ref().find(|part| !part.is_empty());

    match (next(), next(), next()) {
        (Some("q" | "quit"), None, None) => Input::Quit,
        (Some(row), Some(col), None) => match (row.parse(), col.parse()) {
            (Ok(row), Ok(col)) => Input::Click(row, col),
            _ => Input::Invalid,
        },
        _ => Input::Invalid,
    }
}

/// Plays one game on `input`/`output` and saves it to `store` once it ends.
pub fn run(
    mut session: GameSession,
    store: &mut dyn RecordStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<RecordId>> {
    let mut lines = input.lines();

    while !session.is_terminal() {
        write!(output, "{}", BoardView(&session))?;
        write!(output, "row col (q to quit)> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match parse_input(&line.context("Could not read input")?) {
            Input::Quit => break,
            Input::Invalid => writeln!(output, "Enter a row and a column, like `3 4`.")?,
            Input::Click(row, col) => match session.click_at(row, col) {
                Ok(RevealOutcome::AlreadyRevealed) => writeln!(output, "Already open.")?,
                Ok(outcome) => log::debug!("click {}x{}: {:?}", row, col, outcome),
                Err(err) => writeln!(output, "{}", err)?,
            },
        }
    }

    let Some(outcome) = session.outcome() else {
        writeln!(output, "Game abandoned, nothing saved.")?;
        return Ok(None);
    };

    write!(output, "{}", BoardView(&session))?;
    match outcome {
        Outcome::Won => writeln!(output, "You Win!")?,
        Outcome::Lost => writeln!(output, "Game Over!")?,
    }

    let timestamp = OffsetDateTime::now_utc();
    loop {
        match session.save(&mut *store, timestamp) {
            Ok(id) => {
                writeln!(output, "Saved as game #{}.", id)?;
                return Ok(Some(id));
            }
            Err(err) => {
                log::error!("Could not save game: {}", err);
                write!(output, "Could not save game: {}. Retry? [y/N] ", err)?;
                output.flush()?;
                let retry = match lines.next() {
                    Some(line) => line.context("Could not read input")?,
                    None => String::new(),
                };
                if !matches!(retry.trim(), "y" | "Y" | "yes") {
                    return Err(err).context("Game finished but was not saved");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session() -> GameSession {
        let board = Board::new(3, 1).unwrap();
        GameSession::with_minefield(Minefield::from_mine_indices(board, &[1]).unwrap(), "ada")
            .unwrap()
    }

    fn play(script: &str, store: &mut dyn RecordStore) -> (Option<RecordId>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let id = run(session(), store, &mut input, &mut output).unwrap();
        (id, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parses_clicks_and_quit() {
        assert_eq!(parse_input("3 4"), Input::Click(3, 4));
        assert_eq!(parse_input(" 3,4 "), Input::Click(3, 4));
        assert_eq!(parse_input("3x4"), Input::Click(3, 4));
        assert_eq!(parse_input("q"), Input::Quit);
        assert_eq!(parse_input("3"), Input::Invalid);
        assert_eq!(parse_input("a b"), Input::Invalid);
        assert_eq!(parse_input("1 2 3"), Input::Invalid);
    }

    #[test]
    fn winning_game_is_saved() {
        let mut store = MemoryStore::new();

        let (id, output) = play("0 0\n0 0\nnonsense\n0 2\n", &mut store);

        assert!(output.contains("Already open."));
        assert!(output.contains("Enter a row and a column"));
        assert!(output.contains("You Win!"));
        let stored = store.get_by_id(id.unwrap()).unwrap();
        assert_eq!(stored.record.outcome, Outcome::Won);
        assert_eq!(stored.record.moves.len(), 2);
    }

    #[test]
    fn losing_game_is_saved() {
        let mut store = MemoryStore::new();

        let (id, output) = play("0 1\n", &mut store);

        assert!(output.contains("Game Over!"));
        assert_eq!(store.get_by_id(id.unwrap()).unwrap().record.outcome, Outcome::Lost);
    }

    #[test]
    fn out_of_bounds_click_is_reported() {
        let mut store = MemoryStore::new();

        let (_, output) = play("5 5\nq\n", &mut store);

        assert!(output.contains("Invalid coordinates"));
    }

    #[test]
    fn quitting_saves_nothing() {
        let mut store = MemoryStore::new();

        let (id, output) = play("0 0\nq\n", &mut store);

        assert_eq!(id, None);
        assert!(output.contains("Game abandoned"));
        assert!(store.list_all().unwrap().is_empty());
    }
}
