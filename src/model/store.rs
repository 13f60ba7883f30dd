//! In-memory dictionary store
//!
//! The store owns the canonical dictionaries. Components never mutate it
//! directly; they emit commands as Actions and the App applies them here.

use super::dictionary::{Dictionary, DictionaryId, Row, RowDraft, RowId};
use tracing::debug;

/// Failure applying a store command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Dictionary {0} no longer exists")]
    UnknownDictionary(DictionaryId),

    #[error("Row {row} no longer exists in dictionary {dictionary}")]
    UnknownRow { dictionary: DictionaryId, row: RowId },

    #[error("Dictionary title cannot be empty")]
    EmptyTitle,
}

/// Canonical dictionary storage
#[derive(Debug, Default)]
pub struct DictionaryStore {
    dictionaries: Vec<Dictionary>,
    next_id: u32,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self {
            dictionaries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn dictionaries(&self) -> &[Dictionary] {
        &self.dictionaries
    }

    pub fn get(&self, id: DictionaryId) -> Option<&Dictionary> {
        self.dictionaries.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    fn get_mut(&mut self, id: DictionaryId) -> Result<&mut Dictionary, StoreError> {
        self.dictionaries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(StoreError::UnknownDictionary(id))
    }

    /// Create a dictionary and return its id
    pub fn create_dictionary(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<DictionaryId, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let id = DictionaryId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.dictionaries
            .push(Dictionary::new(id, title, description.trim()));
        debug!(%id, title, "created dictionary");
        Ok(id)
    }

    /// Insert a fully built dictionary (used for seeding)
    pub fn insert(
        &mut self,
        title: &str,
        description: &str,
        rows: Vec<Row>,
    ) -> Result<DictionaryId, StoreError> {
        let id = self.create_dictionary(title, description)?;
        self.get_mut(id)?.rows = rows;
        Ok(id)
    }

    pub fn delete_dictionary(&mut self, id: DictionaryId) -> Result<Dictionary, StoreError> {
        let index = self
            .dictionaries
            .iter()
            .position(|d| d.id == id)
            .ok_or(StoreError::UnknownDictionary(id))?;
        debug!(%id, "deleted dictionary");
        Ok(self.dictionaries.remove(index))
    }

    /// Append an empty row and return its id
    pub fn add_row(&mut self, id: DictionaryId) -> Result<RowId, StoreError> {
        let dictionary = self.get_mut(id)?;
        let row = Row::empty();
        let row_id = row.id;
        dictionary.rows.push(row);
        debug!(%id, %row_id, "added row");
        Ok(row_id)
    }

    /// Overwrite a row's values with a validated draft
    pub fn edit_row(
        &mut self,
        id: DictionaryId,
        row_id: RowId,
        draft: RowDraft,
    ) -> Result<(), StoreError> {
        let row = self
            .get_mut(id)?
            .rows
            .iter_mut()
            .find(|row| row.id == row_id)
            .ok_or(StoreError::UnknownRow { dictionary: id, row: row_id })?;
        let changed = !draft.matches(row);
        row.from = draft.from;
        row.to = draft.to;
        debug!(%id, %row_id, changed, "edited row");
        Ok(())
    }

    pub fn delete_row(&mut self, id: DictionaryId, row_id: RowId) -> Result<Row, StoreError> {
        let dictionary = self.get_mut(id)?;
        let index = dictionary
            .row_index(row_id)
            .ok_or(StoreError::UnknownRow { dictionary: id, row: row_id })?;
        debug!(%id, %row_id, "deleted row");
        Ok(dictionary.rows.remove(index))
    }
}
