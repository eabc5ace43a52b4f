use crate::*;
pub use json_file::*;
pub use memory::*;

mod json_file;
mod memory;

/// Persistence for finished games.
///
/// Ids are assigned by the store, start at 1 and keep counting up, even across [`clear_all`].
///
/// [`clear_all`]: RecordStore::clear_all
pub trait RecordStore {
    fn save(&mut self, record: &GameRecord) -> core::result::Result<RecordId, StoreError>;

    /// Every stored game, oldest first.
    fn list_all(&self) -> core::result::Result<Vec<StoredRecord>, StoreError>;

    fn get_by_id(&self, id: RecordId) -> core::result::Result<StoredRecord, StoreError>;

    fn clear_all(&mut self) -> core::result::Result<(), StoreError>;
}
