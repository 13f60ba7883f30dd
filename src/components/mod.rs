//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod dictionary_list;
pub mod dictionary_panel;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod new_dictionary_dialog;
pub mod row_editor;

pub use confirm_dialog::ConfirmDialog;
pub use dictionary_list::DictionaryList;
pub use dictionary_panel::DictionaryPanel;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use new_dictionary_dialog::NewDictionaryDialog;
