//! Dictionary data model
//!
//! A dictionary is an ordered list of translation rows. Rows carry a stable
//! generated id so commands never address them by position.

use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

/// Store-assigned dictionary identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DictionaryId(pub u32);

impl fmt::Display for DictionaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable row identifier, independent of the row's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed translation pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub from: String,
    pub to: String,
}

impl Row {
    /// Create an empty row with a fresh id
    pub fn empty() -> Self {
        Self::new("", "")
    }

    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Stage this row's values for editing
    pub fn draft(&self) -> RowDraft {
        RowDraft::new(self.from.clone(), self.to.clone())
    }
}

/// Which half of a pair is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowField {
    #[default]
    From,
    To,
}

impl RowField {
    pub fn toggle(self) -> Self {
        match self {
            RowField::From => RowField::To,
            RowField::To => RowField::From,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RowField::From => "From",
            RowField::To => "To",
        }
    }
}

/// Uncommitted values staged by a row editor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowDraft {
    pub from: String,
    pub to: String,
}

impl RowDraft {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn field(&self, field: RowField) -> &str {
        match field {
            RowField::From => &self.from,
            RowField::To => &self.to,
        }
    }

    pub fn field_mut(&mut self, field: RowField) -> &mut String {
        match field {
            RowField::From => &mut self.from,
            RowField::To => &mut self.to,
        }
    }

    /// Whether the draft holds exactly the same pair as `row`
    pub fn matches(&self, row: &Row) -> bool {
        self.from == row.from && self.to == row.to
    }
}

/// A named collection of translation rows
#[derive(Debug, Clone)]
pub struct Dictionary {
    pub id: DictionaryId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Local>,
    pub rows: Vec<Row>,
}

impl Dictionary {
    pub fn new(id: DictionaryId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            created_at: Local::now(),
            rows: Vec::new(),
        }
    }

    /// Position of the row with the given id
    pub fn row_index(&self, row_id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == row_id)
    }

    pub fn row(&self, row_id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == row_id)
    }

    pub fn formatted_created(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_ids_are_unique() {
        let a = Row::empty();
        let b = Row::empty();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_draft_copies_committed_values() {
        let row = Row::new("cat", "gato");
        let draft = row.draft();
        assert_eq!(draft, RowDraft::new("cat", "gato"));
        assert!(draft.matches(&row));
    }

    #[test]
    fn test_draft_field_access() {
        let mut draft = RowDraft::default();
        draft.field_mut(RowField::To).push_str("perro");
        assert_eq!(draft.field(RowField::From), "");
        assert_eq!(draft.field(RowField::To), "perro");
        assert_eq!(RowField::From.toggle(), RowField::To);
    }

    #[test]
    fn test_row_lookup_by_id() {
        let mut dict = Dictionary::new(DictionaryId(1), "Animals", "");
        let first = Row::new("cat", "gato");
        let second = Row::new("dog", "perro");
        let second_id = second.id;
        dict.rows.push(first);
        dict.rows.push(second);

        assert_eq!(dict.row_index(second_id), Some(1));
        assert_eq!(dict.row(second_id).map(|r| r.to.as_str()), Some("perro"));
        assert_eq!(dict.row_index(RowId::new()), None);
    }
}
