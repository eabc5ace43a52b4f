use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::*;

/// On-disk layout: every saved game plus the next id to hand out.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    next_id: RecordId,
    #[serde(default)]
    games: Vec<StoredRecord>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            next_id: 1,
            games: Vec::new(),
        }
    }
}

/// Keeps all games in a single pretty-printed JSON file.
///
/// The file is read on every call and rewritten whole on every change, a missing file counts as an
/// empty history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> core::result::Result<StoreDocument, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No game history at {}, starting empty", self.path.display());
                Ok(StoreDocument::default())
            }
            Err(err) => {
                log::warn!("Could not read {}: {}", self.path.display(), err);
                Err(err.into())
            }
        }
    }

    fn write(&self, document: &StoreDocument) -> core::result::Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json).map_err(|err| {
            log::warn!("Could not write {}: {}", self.path.display(), err);
            err.into()
        })
    }
}

impl RecordStore for JsonFileStore {
    fn save(&mut self, record: &GameRecord) -> core::result::Result<RecordId, StoreError> {
        let mut document = self.load()?;
        let id = document.next_id;
        document.games.push(StoredRecord {
            id,
            record: record.clone(),
        });
        document.next_id += 1;
        self.write(&document)?;
        Ok(id)
    }

    fn list_all(&self) -> core::result::Result<Vec<StoredRecord>, StoreError> {
        let mut games = self.load()?.games;
        games.sort_by_key(|stored| stored.id);
        Ok(games)
    }

    fn get_by_id(&self, id: RecordId) -> core::result::Result<StoredRecord, StoreError> {
        self.load()?
            .games
            .into_iter()
            .find(|stored| stored.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn clear_all(&mut self) -> core::result::Result<(), StoreError> {
        let document = self.load()?;
        self.write(&StoreDocument {
            next_id: document.next_id,
            games: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use time::OffsetDateTime;

    use super::*;

    fn temp_store() -> JsonFileStore {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "minelog-store-test-{}-{}",
            std::process::id(),
            test_id
        ));
        let _ = fs::remove_dir_all(&dir);
        JsonFileStore::new(dir.join("nested").join("games.json"))
    }

    fn record(player_name: &str, outcome: Outcome) -> GameRecord {
        GameRecord {
            player_name: player_name.into(),
            width: 9,
            height: 9,
            mine_count: 10,
            outcome,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            moves: vec![
                Move {
                    row: 4,
                    col: 4,
                    result: MoveResult::Safe,
                },
                Move {
                    row: 0,
                    col: 8,
                    result: MoveResult::Mine,
                },
            ],
        }
    }

    #[test]
    fn missing_file_is_empty_history() {
        let store = temp_store();

        assert!(store.list_all().unwrap().is_empty());
        assert!(matches!(store.get_by_id(1), Err(StoreError::NotFound(1))));
    }

    #[test]
    fn saved_games_survive_reopening() {
        let mut store = temp_store();
        let first = store.save(&record("ada", Outcome::Lost)).unwrap();
        let second = store.save(&record("bob", Outcome::Won)).unwrap();

        let reopened = JsonFileStore::new(store.path());

        assert_eq!((first, second), (1, 2));
        assert_eq!(
            reopened.get_by_id(first).unwrap().record,
            record("ada", Outcome::Lost)
        );
        assert_eq!(reopened.list_all().unwrap().len(), 2);
    }

    #[test]
    fn clear_all_empties_file_but_not_id_counter() {
        let mut store = temp_store();
        store.save(&record("ada", Outcome::Lost)).unwrap();

        store.clear_all().unwrap();

        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.save(&record("bob", Outcome::Won)).unwrap(), 2);
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.list_all(), Err(StoreError::Format(_))));
    }

    #[test]
    fn unwritable_location_is_an_io_error() {
        let mut store = temp_store();
        // a directory where the file should be
        fs::create_dir_all(store.path()).unwrap();

        assert!(matches!(
            store.save(&record("ada", Outcome::Won)),
            Err(StoreError::Io(_))
        ));
    }
}
