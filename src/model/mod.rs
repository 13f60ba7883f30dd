//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DictionaryStore` - Canonical dictionaries and their rows
//! - `validate_candidate_row` - Save-time row validation
//! - `ModalStack` - Modal overlay management

pub mod dictionary;
pub mod modal;
pub mod seed;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use dictionary::{Dictionary, DictionaryId, Row, RowDraft, RowField, RowId};
pub use modal::{Modal, ModalStack};
pub use store::{DictionaryStore, StoreError};
pub use validation::{validate_candidate_row, ValidationError, ValidationKind};
