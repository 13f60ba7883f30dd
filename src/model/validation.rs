//! Row validation
//!
//! Checks a candidate row against the rest of its dictionary before a save is
//! committed. Validation is pure: the result belongs to the save attempt that
//! asked for it.

use super::dictionary::{Row, RowDraft};
use std::collections::BTreeSet;

/// Reason a candidate row was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationKind {
    /// `from` or `to` is blank
    #[error("Both 'From' and 'To' must be filled in")]
    Empty,
    /// Candidate duplicates another row exactly
    #[error("This translation already exists in the dictionary")]
    Clone,
    /// Candidate shares its source term with a row that translates it differently
    #[error("This term already has a different translation in the dictionary")]
    Fork,
}

/// Outcome of a rejected save attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    /// Positions (in the full row sequence) to highlight
    pub row_indexes: BTreeSet<usize>,
}

impl ValidationError {
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn contains(&self, row_index: usize) -> bool {
        self.row_indexes.contains(&row_index)
    }
}

/// Validate `candidate` as the new value of the row at `candidate_index`.
///
/// The row currently at `candidate_index` is excluded from the comparison, so
/// saving a row unchanged never conflicts with itself. When several rows
/// conflict the reported kind is the last one found in row order, while every
/// conflicting row is recorded.
pub fn validate_candidate_row(
    rows: &[Row],
    candidate: &RowDraft,
    candidate_index: usize,
) -> Result<(), ValidationError> {
    let mut kind = None;
    let mut row_indexes = BTreeSet::new();

    if candidate.from.is_empty() || candidate.to.is_empty() {
        kind = Some(ValidationKind::Empty);
    }

    let rest = rows
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != candidate_index);

    for (index, row) in rest {
        if row.from != candidate.from {
            continue;
        }
        if row.to == candidate.to {
            kind = Some(ValidationKind::Clone);
        } else {
            kind = Some(ValidationKind::Fork);
        }
        row_indexes.insert(index);
    }

    match kind {
        Some(kind) => {
            row_indexes.insert(candidate_index);
            Err(ValidationError { kind, row_indexes })
        }
        None => Ok(()),
    }
}
