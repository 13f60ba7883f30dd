//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns
//! the dictionary store and is the only place store commands are applied.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ConfirmDialog, DictionaryList, DictionaryPanel, HelpDialog,
    HomeRenderContext, NewDictionaryDialog,
};
use crate::model::{Dictionary, DictionaryStore, Modal, ModalStack, StoreError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Canonical dictionaries
    pub store: DictionaryStore,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub list: DictionaryList,
    pub panel: DictionaryPanel,
    pub confirm_dialog: ConfirmDialog,
    pub new_dictionary_dialog: NewDictionaryDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DictionaryStore::new())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App around an already populated store
    pub fn new(store: DictionaryStore) -> App {
        let mut app = App {
            store,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            list: DictionaryList::new(),
            panel: DictionaryPanel::new(),
            confirm_dialog: ConfirmDialog::quit(),
            new_dictionary_dialog: NewDictionaryDialog::new(),
            help_dialog: HelpDialog::default(),
        };
        app.sync_selection();
        app
    }

    /// Get the currently selected dictionary
    pub fn selected_dictionary(&self) -> Option<&Dictionary> {
        self.list.selected(self.store.dictionaries())
    }

    /// Re-point the list and panel at the store's current contents
    fn sync_selection(&mut self) {
        self.list.clamp(self.store.len());
        let selected = self.list.selected(self.store.dictionaries());
        self.panel.show(selected);
    }

    fn selected_row_count(&self) -> usize {
        self.selected_dictionary().map_or(0, |d| d.rows.len())
    }

    /// Apply a store command, returning any follow-up action
    fn apply_store_command(&mut self, action: Action) -> Result<Option<Action>, StoreError> {
        match action {
            Action::CreateDictionary { title, description } => {
                let id = self.store.create_dictionary(&title, &description)?;
                info!(%id, title = title.trim(), "dictionary created");
                if matches!(self.modals.top(), Some(Modal::NewDictionary)) {
                    self.modals.pop();
                }
                self.list.select_id(self.store.dictionaries(), id);
                self.status_message = Some(format!("Created \"{}\"", title.trim()));
            }
            Action::DeleteDictionary(id) => {
                let removed = self.store.delete_dictionary(id)?;
                info!(%id, rows = removed.rows.len(), "dictionary deleted");
                self.status_message = Some(format!("Deleted \"{}\"", removed.title));
            }
            Action::AddRow(id) => {
                let row_id = self.store.add_row(id)?;
                if let Some(dictionary) = self.store.get(id) {
                    self.panel.row_added(dictionary, row_id);
                }
            }
            Action::EditRow {
                dictionary,
                row,
                draft,
            } => {
                self.store.edit_row(dictionary, row, draft)?;
                self.status_message = Some("Row saved".to_string());
            }
            Action::DeleteRow { dictionary, row } => {
                self.store.delete_row(dictionary, row)?;
                self.status_message = Some("Row deleted".to_string());
            }
            _ => return Ok(None),
        }
        self.sync_selection();
        Ok(None)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // Messages last until the next key press
        self.error = None;
        self.status_message = None;

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.panel.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action.is_store_command() {
            debug!(%action, "applying store command");
            let is_create = matches!(action, Action::CreateDictionary { .. });
            return match self.apply_store_command(action) {
                Ok(next) => Ok(next),
                Err(err @ StoreError::EmptyTitle) if is_create => {
                    self.new_dictionary_dialog.set_error(err.to_string());
                    Ok(None)
                }
                Err(err) => {
                    warn!(error = %err, "store command failed");
                    self.error = Some(err.to_string());
                    self.sync_selection();
                    Ok(None)
                }
            };
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => {
                let len = self.selected_row_count();
                self.panel.next_row(len);
            }
            Action::PrevRow => {
                let len = self.selected_row_count();
                self.panel.previous_row(len);
            }
            Action::FirstRow => {
                let len = self.selected_row_count();
                self.panel.select_first(len);
            }
            Action::LastRow => {
                let len = self.selected_row_count();
                self.panel.select_last(len);
            }
            Action::NextDictionary => {
                self.list.next(self.store.len());
                self.sync_selection();
            }
            Action::PrevDictionary => {
                self.list.previous(self.store.len());
                self.sync_selection();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.confirm_dialog = ConfirmDialog::quit();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenNewDictionary => {
                self.new_dictionary_dialog.reset();
                self.modals.push(Modal::NewDictionary);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.top().cloned() {
                Some(Modal::QuitConfirm) => {
                    self.should_quit = true;
                }
                Some(Modal::DeleteDictionaryConfirm { dictionary }) => {
                    self.modals.pop();
                    return Ok(Some(Action::DeleteDictionary(dictionary)));
                }
                _ => {}
            },

            // ─────────────────────────────────────────────────────────────────
            // Dictionary Panel
            // ─────────────────────────────────────────────────────────────────
            Action::RequestAddRow => {
                return Ok(self.panel.request_add_row());
            }
            Action::RequestDeleteDictionary => {
                if let Some(modal) = self.panel.request_delete_dictionary() {
                    let title = self
                        .selected_dictionary()
                        .map(|d| d.title.clone())
                        .unwrap_or_default();
                    self.confirm_dialog = ConfirmDialog::delete_dictionary(&title);
                    self.modals.push(modal);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Editor
            // ─────────────────────────────────────────────────────────────────
            Action::StartEdit => {
                if let Some(dictionary) = self.list.selected(self.store.dictionaries()) {
                    self.panel.start_edit(dictionary);
                }
            }
            Action::SaveRow => {
                if let Some(dictionary) = self.list.selected(self.store.dictionaries()) {
                    return Ok(self.panel.save_row(dictionary));
                }
            }
            Action::RequestDeleteRow => {
                if let Some(dictionary) = self.list.selected(self.store.dictionaries()) {
                    return Ok(self.panel.request_delete_row(dictionary));
                }
            }
            Action::CancelEdit
            | Action::EditInput(_)
            | Action::EditBackspace
            | Action::SwitchField => {
                return self.panel.update(action);
            }

            // Store commands were handled above
            Action::CreateDictionary { .. }
            | Action::DeleteDictionary(_)
            | Action::AddRow(_)
            | Action::EditRow { .. }
            | Action::DeleteRow { .. } => {}
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            dictionaries: self.store.dictionaries(),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        draw_home_screen(frame, area, &mut self.list, &mut self.panel, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm | Modal::DeleteDictionaryConfirm { .. } => {
                self.confirm_dialog.handle_key_event(key)
            }
            Modal::NewDictionary => self.new_dictionary_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm | Modal::DeleteDictionaryConfirm { .. } => {
                self.confirm_dialog.draw(frame, area)
            }
            Modal::NewDictionary => self.new_dictionary_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, RowDraft, ValidationKind};
    use ratatui::{backend::TestBackend, Terminal};

    fn app_with(pairs: &[(&str, &str)]) -> App {
        let mut store = DictionaryStore::new();
        store
            .insert(
                "Colors",
                "Color names",
                pairs.iter().map(|(f, t)| Row::new(*f, *t)).collect(),
            )
            .unwrap();
        App::new(store)
    }

    /// Apply an action and every follow-up, like the main loop does
    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(action) = app.handle_key_event(key).unwrap() {
            run(app, action);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn pairs(app: &App) -> Vec<(String, String)> {
        app.selected_dictionary()
            .unwrap()
            .rows
            .iter()
            .map(|r| (r.from.clone(), r.to.clone()))
            .collect()
    }

    fn clear_field(app: &mut App) {
        for _ in 0..20 {
            press(app, KeyCode::Backspace);
        }
    }

    #[test]
    fn test_fork_edit_is_rejected_and_rows_unchanged() {
        let mut app = app_with(&[("a", "x"), ("a", "y")]);
        run(&mut app, Action::NextRow);
        run(&mut app, Action::StartEdit);
        press(&mut app, KeyCode::Tab);
        clear_field(&mut app);
        type_text(&mut app, "z");
        press(&mut app, KeyCode::Enter);

        assert!(app.panel.is_editing());
        assert_eq!(
            app.panel.validation_error().unwrap().kind,
            ValidationKind::Fork
        );
        assert_eq!(
            pairs(&app),
            vec![("a".into(), "x".into()), ("a".into(), "y".into())]
        );
    }

    #[test]
    fn test_unchanged_save_succeeds() {
        let mut app = app_with(&[("a", "x")]);
        run(&mut app, Action::StartEdit);
        run(&mut app, Action::SaveRow);

        assert!(!app.panel.is_editing());
        assert!(app.panel.validation_error().is_none());
        assert_eq!(pairs(&app), vec![("a".into(), "x".into())]);
        assert_eq!(app.status_message.as_deref(), Some("Row saved"));
    }

    #[test]
    fn test_add_row_then_save_commits_draft() {
        let mut app = app_with(&[("a", "x")]);
        press(&mut app, KeyCode::Char('a'));

        // Only the new row is in edit mode
        let new_row = app.selected_dictionary().unwrap().rows[1].id;
        assert_eq!(app.panel.editor.as_ref().map(|e| e.row_id), Some(new_row));

        type_text(&mut app, "b");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "y");
        press(&mut app, KeyCode::Enter);

        assert!(!app.panel.is_editing());
        assert_eq!(
            pairs(&app),
            vec![("a".into(), "x".into()), ("b".into(), "y".into())]
        );
    }

    #[test]
    fn test_saving_empty_new_row_fails() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert!(app.panel.is_editing());
        assert_eq!(
            app.panel.validation_error().unwrap().kind,
            ValidationKind::Empty
        );
        assert!(app.panel.has_error(0));
    }

    #[test]
    fn test_delete_duplicate_row_needs_no_valid_state() {
        let mut app = app_with(&[("a", "x"), ("a", "x")]);
        run(&mut app, Action::StartEdit);
        run(&mut app, Action::SaveRow);
        assert!(app.panel.validation_error().is_some());

        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let action = app.handle_key_event(ctrl_d).unwrap().unwrap();
        run(&mut app, action);

        assert!(!app.panel.is_editing());
        assert!(app.panel.validation_error().is_none());
        assert_eq!(pairs(&app), vec![("a".into(), "x".into())]);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut app = app_with(&[("a", "x")]);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "bc");
        press(&mut app, KeyCode::Esc);

        assert!(!app.panel.is_editing());
        assert_eq!(pairs(&app), vec![("a".into(), "x".into())]);
    }

    #[test]
    fn test_delete_dictionary_requires_confirmation() {
        let mut app = app_with(&[("a", "x")]);
        press(&mut app, KeyCode::Char('D'));
        assert!(matches!(
            app.modals.top(),
            Some(Modal::DeleteDictionaryConfirm { .. })
        ));

        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());
        assert_eq!(app.store.len(), 1);

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.modals.is_empty());
        assert!(app.store.is_empty());
        assert!(app.selected_dictionary().is_none());
        assert_eq!(app.panel.dictionary, None);
    }

    #[test]
    fn test_create_dictionary_from_dialog() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        // Empty title keeps the dialog open with an error
        assert_eq!(app.modals.top(), Some(&Modal::NewDictionary));
        assert!(app.new_dictionary_dialog.error.is_some());
        assert_eq!(app.store.len(), 1);

        type_text(&mut app, "Fruits");
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.selected_dictionary().unwrap().title, "Fruits");
    }

    #[test]
    fn test_switching_dictionary_closes_editor() {
        let mut app = app_with(&[("a", "x")]);
        app.store.create_dictionary("Second", "").unwrap();
        run(&mut app, Action::StartEdit);
        assert!(app.panel.is_editing());

        run(&mut app, Action::NextDictionary);
        assert!(!app.panel.is_editing());
        assert_eq!(app.selected_dictionary().unwrap().title, "Second");
    }

    #[test]
    fn test_stale_row_command_reports_error() {
        let mut app = app_with(&[("a", "x")]);
        let id = app.selected_dictionary().unwrap().id;
        run(
            &mut app,
            Action::EditRow {
                dictionary: id,
                row: crate::model::RowId::new(),
                draft: RowDraft::new("b", "y"),
            },
        );
        assert!(app.error.is_some());
        assert_eq!(pairs(&app), vec![("a".into(), "x".into())]);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_draw_with_modal() {
        let mut app = app_with(&[("a", "x")]);
        run(&mut app, Action::OpenHelp);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                app.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
    }

    #[test]
    fn test_delete_empty_new_row_needs_no_valid_state() {
        let mut app = app_with(&[("a", "x")]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.selected_row_count(), 2);
        assert!(app.panel.is_editing());

        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let action = app.handle_key_event(ctrl_d).unwrap().unwrap();
        run(&mut app, action);

        assert_eq!(app.selected_row_count(), 1);
        assert!(!app.panel.is_editing());
        assert!(app.panel.validation_error().is_none());
        assert_eq!(pairs(&app), vec![("a".into(), "x".into())]);
    }
}
