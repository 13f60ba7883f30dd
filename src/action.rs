//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state. Store commands are Actions too: components never
//! mutate the dictionary store themselves.

use crate::model::{DictionaryId, RowDraft, RowId};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next row in the table
    NextRow,
    /// Move to previous row in the table
    PrevRow,
    /// Jump to first row
    FirstRow,
    /// Jump to last row
    LastRow,
    /// Select the next dictionary
    NextDictionary,
    /// Select the previous dictionary
    PrevDictionary,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the new dictionary form
    OpenNewDictionary,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Dictionary Panel
    // ─────────────────────────────────────────────────────────────────────────
    /// Ask to append a row to the selected dictionary
    RequestAddRow,
    /// Ask to delete the selected dictionary (opens confirmation)
    RequestDeleteDictionary,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Editor
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter edit mode on the selected row
    StartEdit,
    /// Validate and commit the open draft
    SaveRow,
    /// Discard the open draft
    CancelEdit,
    /// Delete the selected row without validation
    RequestDeleteRow,
    /// Add character to the active draft field
    EditInput(char),
    /// Remove last character from the active draft field
    EditBackspace,
    /// Switch the active draft field
    SwitchField,

    // ─────────────────────────────────────────────────────────────────────────
    // Store Commands
    // ─────────────────────────────────────────────────────────────────────────
    /// Create a dictionary
    CreateDictionary { title: String, description: String },
    /// Delete a dictionary
    DeleteDictionary(DictionaryId),
    /// Append an empty row
    AddRow(DictionaryId),
    /// Commit a validated draft to a row
    EditRow {
        dictionary: DictionaryId,
        row: RowId,
        draft: RowDraft,
    },
    /// Remove a row
    DeleteRow { dictionary: DictionaryId, row: RowId },
}

impl Action {
    /// Whether this action mutates the dictionary store
    pub fn is_store_command(&self) -> bool {
        matches!(
            self,
            Action::CreateDictionary { .. }
                | Action::DeleteDictionary(_)
                | Action::AddRow(_)
                | Action::EditRow { .. }
                | Action::DeleteRow { .. }
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::NextDictionary => write!(f, "NextDictionary"),
            Action::PrevDictionary => write!(f, "PrevDictionary"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenNewDictionary => write!(f, "OpenNewDictionary"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::RequestAddRow => write!(f, "RequestAddRow"),
            Action::RequestDeleteDictionary => write!(f, "RequestDeleteDictionary"),
            Action::StartEdit => write!(f, "StartEdit"),
            Action::SaveRow => write!(f, "SaveRow"),
            Action::CancelEdit => write!(f, "CancelEdit"),
            Action::RequestDeleteRow => write!(f, "RequestDeleteRow"),
            Action::EditInput(c) => write!(f, "EditInput('{}')", c),
            Action::EditBackspace => write!(f, "EditBackspace"),
            Action::SwitchField => write!(f, "SwitchField"),
            Action::CreateDictionary { title, .. } => write!(f, "CreateDictionary({})", title),
            Action::DeleteDictionary(id) => write!(f, "DeleteDictionary({})", id),
            Action::AddRow(id) => write!(f, "AddRow({})", id),
            Action::EditRow { dictionary, row, .. } => {
                write!(f, "EditRow({}, {})", dictionary, row)
            }
            Action::DeleteRow { dictionary, row } => {
                write!(f, "DeleteRow({}, {})", dictionary, row)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_commands_are_flagged() {
        assert!(Action::AddRow(DictionaryId(1)).is_store_command());
        assert!(Action::DeleteDictionary(DictionaryId(1)).is_store_command());
        assert!(!Action::RequestAddRow.is_store_command());
        assert!(!Action::SaveRow.is_store_command());
    }

    #[test]
    fn test_display_includes_payload() {
        assert_eq!(Action::EditInput('x').to_string(), "EditInput('x')");
        assert_eq!(Action::AddRow(DictionaryId(4)).to_string(), "AddRow(#4)");
    }
}
