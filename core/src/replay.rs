use core::fmt;

use time::macros::format_description;

use crate::*;

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => f.write_str("Won"),
            Self::Lost => f.write_str("Lost"),
        }
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mine => f.write_str("Mine"),
            Self::Safe => f.write_str("Safe"),
        }
    }
}

fn write_timestamp(f: &mut fmt::Formatter<'_>, record: &GameRecord) -> fmt::Result {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    let utc = record.timestamp.to_offset(time::UtcOffset::UTC);
    let formatted = utc.format(format).map_err(|_| fmt::Error)?;
    f.write_str(&formatted)
}

/// One line of the game history list.
#[derive(Copy, Clone, Debug)]
pub struct HistoryLine<'a>(pub &'a StoredRecord);

impl fmt::Display for HistoryLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let StoredRecord { id, record } = self.0;
        write!(f, "#{} Player: {} - Game on ", id, record.player_name)?;
        write_timestamp(f, record)?;
        write!(
            f,
            " - Size: {}x{} - Mines: {} - Result: {}",
            record.width, record.height, record.mine_count, record.outcome
        )
    }
}

/// Header and numbered move list of a single game.
#[derive(Copy, Clone, Debug)]
pub struct ReplayView<'a>(pub &'a GameRecord);

impl fmt::Display for ReplayView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        writeln!(
            f,
            "Game Replay: Player: {} | Size: {}x{} | Mines: {} | Result: {}",
            record.player_name, record.width, record.height, record.mine_count, record.outcome
        )?;

        if record.moves.is_empty() {
            return writeln!(f, "No moves recorded for this game.");
        }
        for (index, step) in record.moves.iter().enumerate() {
            writeln!(
                f,
                "Move {}: {}x{} - {}",
                index + 1,
                step.row,
                step.col,
                step.result
            )?;
        }
        Ok(())
    }
}
