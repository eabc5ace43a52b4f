use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

/// One game from first click until it is saved.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    player_name: String,
    field: PlayField,
    moves: MoveLog,
    state: SessionState,
    saved_as: Option<RecordId>,
}

impl GameSession {
    /// Validates the player name and generates a fresh minefield for `config`.
    pub fn start(
        config: GameConfig,
        player_name: &str,
        generator: impl MineGenerator,
    ) -> Result<Self> {
        // re-check, the fields are public
        let config = GameConfig::new(config.board.width(), config.board.height(), config.mines)?;
        Self::check_player_name(player_name)?;
        let minefield = generator.generate(config)?;
        Self::with_minefield(minefield, player_name)
    }

    /// Starts a game on an already laid out minefield, the player name is trimmed.
    pub fn with_minefield(minefield: Minefield, player_name: &str) -> Result<Self> {
        let player_name = Self::check_player_name(player_name)?;
        let board = minefield.board();
        log::debug!(
            "New game for {:?}: {}x{} with {} mines",
            player_name,
            board.width(),
            board.height(),
            minefield.mine_count()
        );
        Ok(Self {
            player_name: player_name.to_owned(),
            field: PlayField::new(minefield),
            moves: MoveLog::new(),
            state: SessionState::InProgress,
            saved_as: None,
        })
    }

    fn check_player_name(player_name: &str) -> Result<&str> {
        let trimmed = player_name.trim();
        if trimmed.is_empty() {
            Err(GameError::EmptyPlayerName)
        } else {
            Ok(trimmed)
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn board(&self) -> Board {
        self.field.board()
    }

    pub fn mine_count(&self) -> CellCount {
        self.field.minefield().mine_count()
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    /// `None` for coordinates off the board.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.field.cell_at(coords)
    }

    pub fn moves(&self) -> &[Move] {
        self.moves.moves()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Id of the stored record, once the game has been saved.
    pub fn saved_as(&self) -> Option<RecordId> {
        self.saved_as
    }

    pub fn click(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let coords = self.board().coords_of(index)?;
        Ok(self.click_coords(coords))
    }

    pub fn click_at(&mut self, row: Coord, col: Coord) -> Result<RevealOutcome> {
        let coords = self.board().validate_coords((row, col))?;
        Ok(self.click_coords(coords))
    }

    fn click_coords(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_terminal() {
            log::debug!("Ignoring click at {:?}, game already ended", coords);
            return RevealOutcome::GameOver;
        }

        let outcome = self.field.reveal_at(coords);
        let (row, col) = coords;
        match outcome {
            RevealOutcome::Mine => {
                self.moves.record(row, col, MoveResult::Mine);
                self.end_game(SessionState::Lost);
            }
            RevealOutcome::SafeRevealed(_) => {
                self.moves.record(row, col, MoveResult::Safe);
                if self.field.is_won() {
                    self.end_game(SessionState::Won);
                }
            }
            RevealOutcome::AlreadyRevealed | RevealOutcome::GameOver => {}
        }
        outcome
    }

    fn end_game(&mut self, state: SessionState) {
        log::debug!(
            "Game for {:?} ended: {:?} after {} moves",
            self.player_name,
            state,
            self.moves.len()
        );
        self.state = state;
    }

    /// Snapshots a finished game as a record.
    pub fn to_record(&self, timestamp: OffsetDateTime) -> Result<GameRecord> {
        let outcome = self.outcome().ok_or(GameError::NotFinished)?;
        Ok(self.moves.to_record(
            &self.player_name,
            self.board(),
            self.mine_count(),
            outcome,
            timestamp,
        ))
    }

    /// Saves the finished game once, later calls return the id of the first save.
    ///
    /// A failed save leaves the session unsaved so it can be retried.
    pub fn save<S: RecordStore + ?Sized>(
        &mut self,
        store: &mut S,
        timestamp: OffsetDateTime,
    ) -> core::result::Result<RecordId, StoreError> {
        if let Some(id) = self.saved_as {
            return Ok(id);
        }

        let record = self.to_record(timestamp).map_err(|_| StoreError::Unfinished)?;
        let id = store.save(&record)?;
        log::debug!("Saved game for {:?} as #{}", self.player_name, id);
        self.saved_as = Some(id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn session(width: Coord, height: Coord, mines: &[CellIndex]) -> GameSession {
        let board = Board::new(width, height).unwrap();
        GameSession::with_minefield(Minefield::from_mine_indices(board, mines).unwrap(), "ada")
            .unwrap()
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn save(&mut self, _record: &GameRecord) -> core::result::Result<RecordId, StoreError> {
            Err(io::Error::other("disk full").into())
        }

        fn list_all(&self) -> core::result::Result<Vec<StoredRecord>, StoreError> {
            Ok(Vec::new())
        }

        fn get_by_id(&self, id: RecordId) -> core::result::Result<StoredRecord, StoreError> {
            Err(StoreError::NotFound(id))
        }

        fn clear_all(&mut self) -> core::result::Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn start_rejects_invalid_config() {
        let generator = || RandomMineGenerator::new(1);
        let bad_mines = GameConfig {
            board: Board::new(2, 2).unwrap(),
            mines: 4,
        };

        assert_eq!(
            GameSession::start(bad_mines, "ada", generator()),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            GameSession::start(GameConfig::preset(Difficulty::Beginner), "  ", generator()),
            Err(GameError::EmptyPlayerName)
        );
        assert!(GameError::EmptyPlayerName.is_invalid_config());
        assert!(!GameError::InvalidCoords.is_invalid_config());
    }

    #[test]
    fn start_generates_requested_board() {
        let config = GameConfig::preset(Difficulty::Beginner);

        let session = GameSession::start(config, " ada ", RandomMineGenerator::new(5)).unwrap();

        assert_eq!(session.player_name(), "ada");
        assert_eq!(session.board(), config.board);
        assert_eq!(session.mine_count(), 10);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn with_minefield_rejects_blank_name() {
        let minefield = || Minefield::from_mine_indices(Board::new(2, 2).unwrap(), &[0]).unwrap();

        assert_eq!(
            GameSession::with_minefield(minefield(), "  "),
            Err(GameError::EmptyPlayerName)
        );
        assert_eq!(
            GameSession::with_minefield(minefield(), ""),
            Err(GameError::EmptyPlayerName)
        );

        let session = GameSession::with_minefield(minefield(), "\tada\n").unwrap();
        assert_eq!(session.player_name(), "ada");
    }

    #[test]
    fn off_board_cell_lookup_is_none() {
        let session = session(3, 2, &[0]);

        assert_eq!(session.cell_at((1, 2)), Some(Cell::Hidden));
        assert_eq!(session.cell_at((2, 0)), None);
        assert_eq!(session.cell_at((0, 3)), None);
    }

    #[test]
    fn mine_click_loses_and_logs_once() {
        let mut session = session(3, 3, &[4]);

        assert_eq!(session.click(4).unwrap(), RevealOutcome::Mine);
        assert_eq!(session.outcome(), Some(Outcome::Lost));
        assert!(session.is_terminal());

        assert_eq!(session.click(0).unwrap(), RevealOutcome::GameOver);
        assert_eq!(session.click(4).unwrap(), RevealOutcome::GameOver);
        assert_eq!(session.cell_at((0, 0)), Some(Cell::Hidden));
        assert_eq!(
            session.moves(),
            &[Move {
                row: 1,
                col: 1,
                result: MoveResult::Mine
            }]
        );
    }

    #[test]
    fn repeated_safe_click_logs_once() {
        let mut session = session(3, 3, &[4]);

        assert_eq!(session.click_at(0, 2).unwrap(), RevealOutcome::SafeRevealed(1));
        assert_eq!(session.click_at(0, 2).unwrap(), RevealOutcome::AlreadyRevealed);

        assert_eq!(session.moves().len(), 1);
        assert_eq!(session.moves()[0].result, MoveResult::Safe);
    }

    #[test]
    fn flood_neighbors_are_not_logged() {
        let mut session = session(4, 4, &[15]);

        assert_eq!(session.click(0).unwrap(), RevealOutcome::SafeRevealed(0));

        assert_eq!(session.moves().len(), 1);
        assert_eq!(session.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut session = session(3, 1, &[1]);

        session.click(0).unwrap();
        assert!(!session.is_terminal());
        session.click(2).unwrap();

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.moves().len(), 2);
    }

    #[test]
    fn click_out_of_bounds_is_an_error() {
        let mut session = session(3, 3, &[4]);

        assert_eq!(session.click(9), Err(GameError::InvalidCoords));
        assert_eq!(session.click_at(0, 3), Err(GameError::InvalidCoords));
        assert!(session.moves().is_empty());
    }

    #[test]
    fn to_record_requires_finished_game() {
        let mut session = session(3, 1, &[1]);

        assert_eq!(
            session.to_record(OffsetDateTime::UNIX_EPOCH),
            Err(GameError::NotFinished)
        );
        session.click(1).unwrap();

        let record = session.to_record(OffsetDateTime::UNIX_EPOCH).unwrap();
        assert_eq!(record.outcome, Outcome::Lost);
        assert_eq!(record.mine_count, 1);
    }

    #[test]
    fn save_is_idempotent() {
        let mut session = session(3, 1, &[1]);
        let mut store = MemoryStore::new();
        session.click(1).unwrap();

        let first = session.save(&mut store, OffsetDateTime::UNIX_EPOCH).unwrap();
        let second = session.save(&mut store, OffsetDateTime::UNIX_EPOCH).unwrap();

        assert_eq!(first, second);
        assert_eq!(session.saved_as(), Some(first));
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn save_refuses_unfinished_game() {
        let mut session = session(3, 1, &[1]);
        let mut store = MemoryStore::new();

        assert!(matches!(
            session.save(&mut store, OffsetDateTime::UNIX_EPOCH),
            Err(StoreError::Unfinished)
        ));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn failed_save_can_be_retried() {
        let mut session = session(3, 1, &[1]);
        session.click(1).unwrap();

        assert!(matches!(
            session.save(&mut FailingStore, OffsetDateTime::UNIX_EPOCH),
            Err(StoreError::Io(_))
        ));
        assert_eq!(session.saved_as(), None);

        let mut store = MemoryStore::new();
        let id = session.save(&mut store, OffsetDateTime::UNIX_EPOCH).unwrap();
        assert_eq!(session.saved_as(), Some(id));
    }
}
