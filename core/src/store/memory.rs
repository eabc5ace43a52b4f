use std::collections::BTreeMap;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryStore {
    games: BTreeMap<RecordId, GameRecord>,
    next_id: RecordId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            games: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn save(&mut self, record: &GameRecord) -> core::result::Result<RecordId, StoreError> {
        let id = self.next_id;
        self.next_id += 1;
        self.games.insert(id, record.clone());
        Ok(id)
    }

    fn list_all(&self) -> core::result::Result<Vec<StoredRecord>, StoreError> {
        Ok(self
            .games
            .iter()
            .map(|(&id, record)| StoredRecord {
                id,
                record: record.clone(),
            })
            .collect())
    }

    fn get_by_id(&self, id: RecordId) -> core::result::Result<StoredRecord, StoreError> {
        self.games
            .get(&id)
            .map(|record| StoredRecord {
                id,
                record: record.clone(),
            })
            .ok_or(StoreError::NotFound(id))
    }

    fn clear_all(&mut self) -> core::result::Result<(), StoreError> {
        self.games.clear();
        Ok(())
    }
}
