//! Dictionary panel component
//!
//! Renders one dictionary's header and row table, and hosts the validation
//! that gates every row save. At most one row editor is open at a time.

use crate::action::Action;
use crate::component::Component;
use crate::components::row_editor::RowEditor;
use crate::model::{
    validate_candidate_row, Dictionary, DictionaryId, Modal, RowDraft, RowId, ValidationError,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState, Wrap},
    Frame,
};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

/// Widest a column grows before its cells are truncated
const MAX_COLUMN_WIDTH: u16 = 50;

/// Panel for the selected dictionary
pub struct DictionaryPanel {
    /// Dictionary currently shown
    pub dictionary: Option<DictionaryId>,
    /// Table selection state
    pub table_state: TableState,
    /// Open editing session, if any
    pub editor: Option<RowEditor>,
    /// Set by `request_add_row` until the store reports the new row
    awaiting_new_row: bool,
}

impl Default for DictionaryPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryPanel {
    pub fn new() -> Self {
        Self {
            dictionary: None,
            table_state: TableState::default(),
            editor: None,
            awaiting_new_row: false,
        }
    }

    /// Point the panel at a dictionary, dropping local state if it changed
    pub fn show(&mut self, dictionary: Option<&Dictionary>) {
        let id = dictionary.map(|d| d.id);
        if id != self.dictionary {
            self.dictionary = id;
            self.editor = None;
            self.awaiting_new_row = false;
            self.table_state
                .select(dictionary.filter(|d| !d.rows.is_empty()).map(|_| 0));
        } else if let Some(dict) = dictionary {
            self.clamp_selection(dict.rows.len());
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next_row(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn previous_row(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.table_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.table_state.select(len.checked_sub(1));
    }

    fn clamp_selection(&mut self, len: usize) {
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dictionary Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask the store to append an empty row; the new row opens in edit mode
    pub fn request_add_row(&mut self) -> Option<Action> {
        let id = self.dictionary?;
        self.awaiting_new_row = true;
        Some(Action::AddRow(id))
    }

    /// Called by the App once the store appended `row_id`
    pub fn row_added(&mut self, dictionary: &Dictionary, row_id: RowId) {
        if !self.awaiting_new_row || self.dictionary != Some(dictionary.id) {
            return;
        }
        self.awaiting_new_row = false;
        if let (Some(index), Some(row)) = (dictionary.row_index(row_id), dictionary.row(row_id)) {
            self.table_state.select(Some(index));
            self.editor = Some(RowEditor::open(row));
        }
    }

    /// The confirmation prompt guarding dictionary deletion
    pub fn request_delete_dictionary(&self) -> Option<Modal> {
        self.dictionary
            .map(|dictionary| Modal::DeleteDictionaryConfirm { dictionary })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Check `candidate` as the new value of the row at `candidate_index`
    pub fn validate_candidate_row(
        &self,
        dictionary: &Dictionary,
        candidate: &RowDraft,
        candidate_index: usize,
    ) -> Result<(), ValidationError> {
        validate_candidate_row(&dictionary.rows, candidate, candidate_index)
    }

    /// Whether the row at `row_index` was flagged by the latest save attempt
    pub fn has_error(&self, row_index: usize) -> bool {
        self.editor
            .as_ref()
            .is_some_and(|editor| editor.has_error(row_index))
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.editor.as_ref().and_then(|e| e.last_attempt.as_ref())
    }

    /// Clear the latest save attempt's result
    pub fn reset_error(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.last_attempt = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Open an editor on the selected row
    pub fn start_edit(&mut self, dictionary: &Dictionary) {
        self.reset_error();
        let Some(row) = self.selected_index().and_then(|i| dictionary.rows.get(i)) else {
            return;
        };
        self.editor = Some(RowEditor::open(row));
    }

    /// Validate the open draft, returning the commit if it passes
    pub fn save_row(&mut self, dictionary: &Dictionary) -> Option<Action> {
        let editor = self.editor.as_ref()?;
        let row_id = editor.row_id;
        let Some(index) = dictionary.row_index(row_id) else {
            warn!(row = %row_id, "row vanished while editing");
            self.editor = None;
            return None;
        };

        match self.validate_candidate_row(dictionary, &editor.draft, index) {
            Ok(()) => {
                let editor = self.editor.take()?;
                info!(dictionary = %dictionary.id, row_index = index, "row saved");
                Some(Action::EditRow {
                    dictionary: dictionary.id,
                    row: editor.row_id,
                    draft: editor.draft,
                })
            }
            Err(err) => {
                debug!(kind = ?err.kind, rows = ?err.row_indexes, "save rejected");
                if let Some(editor) = self.editor.as_mut() {
                    editor.last_attempt = Some(err);
                }
                None
            }
        }
    }

    /// Discard the open draft
    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Delete the row being edited, or the selected row; never validated
    pub fn request_delete_row(&mut self, dictionary: &Dictionary) -> Option<Action> {
        self.reset_error();
        let row_id = match self.editor.take() {
            Some(editor) => editor.row_id,
            None => dictionary.rows.get(self.selected_index()?)?.id,
        };
        Some(Action::DeleteRow {
            dictionary: dictionary.id,
            row: row_id,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the panel for `dictionary`
    pub fn draw_with_dictionary(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        dictionary: Option<&Dictionary>,
    ) -> Result<()> {
        let Some(dictionary) = dictionary else {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No dictionaries yet",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press n to create one",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty, area);
            return Ok(());
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dictionary.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Description + meta
                Constraint::Length(1), // Validation message
                Constraint::Min(0),    // Table
            ])
            .split(inner);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                dictionary.description.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!(
                    "{} rows · created {}",
                    dictionary.rows.len(),
                    dictionary.formatted_created()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(header, chunks[0]);

        if let Some(err) = self.validation_error() {
            let message = Paragraph::new(Line::from(Span::styled(
                err.message(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(message, chunks[1]);
        }

        self.render_table(frame, chunks[2], dictionary);
        Ok(())
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, dictionary: &Dictionary) {
        let (from_width, to_width) = column_widths(dictionary, self.editor.as_ref());

        let rows: Vec<TableRow> = dictionary
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let has_error = self.has_error(index);
                match self.editor.as_ref().filter(|e| e.row_id == row.id) {
                    Some(editor) => {
                        let [from, to] = editor.cells(has_error);
                        TableRow::new(vec![
                            Cell::from(from),
                            Cell::from(to),
                            Cell::from(Span::styled(
                                "editing",
                                Style::default().fg(Color::Yellow),
                            )),
                        ])
                    }
                    None => {
                        let style = if has_error {
                            Style::default().fg(Color::White).bg(Color::Red)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        TableRow::new(vec![
                            Cell::from(row.from.clone()),
                            Cell::from(row.to.clone()),
                            Cell::from(""),
                        ])
                        .style(style)
                    }
                }
            })
            .collect();

        let header = TableRow::new(vec!["From", "To", ""]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let table = Table::new(
            rows,
            [
                Constraint::Length(from_width),
                Constraint::Length(to_width),
                Constraint::Min(7),
            ],
        )
        .header(header)
        .column_spacing(3)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

/// Column widths fitted to the widest cell, including the open draft
fn column_widths(dictionary: &Dictionary, editor: Option<&RowEditor>) -> (u16, u16) {
    let mut from = "From".width();
    let mut to = "To".width();
    for row in &dictionary.rows {
        from = from.max(row.from.width());
        to = to.max(row.to.width());
    }
    if let Some(editor) = editor {
        // Room for the cursor marker
        from = from.max(editor.draft.from.width() + 1);
        to = to.max(editor.draft.to.width() + 1);
    }
    let clamp = |w: usize| (w.min(MAX_COLUMN_WIDTH as usize) as u16).max(6);
    (clamp(from), clamp(to))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for DictionaryPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(editor) = self.editor.as_mut() {
            return editor.handle_key_event(key);
        }

        let action = match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') => Some(Action::FirstRow),
            KeyCode::Char('G') => Some(Action::LastRow),

            // Dictionaries
            KeyCode::Tab => Some(Action::NextDictionary),
            KeyCode::BackTab => Some(Action::PrevDictionary),
            KeyCode::Char('n') => Some(Action::OpenNewDictionary),
            KeyCode::Char('D') => Some(Action::RequestDeleteDictionary),

            // Row lifecycle
            KeyCode::Char('a') => Some(Action::RequestAddRow),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::StartEdit),
            KeyCode::Char('x') | KeyCode::Delete => Some(Action::RequestDeleteRow),

            // Modals
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        // Draft edits go to the open editor; everything that needs the
        // dictionary is called directly by the App
        match action {
            Action::EditInput(_) | Action::EditBackspace | Action::SwitchField => {
                if let Some(editor) = self.editor.as_mut() {
                    return editor.update(action);
                }
            }
            Action::CancelEdit => self.cancel_edit(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_with_dictionary which takes the data
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, ValidationKind};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn dictionary(pairs: &[(&str, &str)]) -> Dictionary {
        let mut dict = Dictionary::new(DictionaryId(1), "Test", "A test dictionary");
        dict.rows = pairs.iter().map(|(f, t)| Row::new(*f, *t)).collect();
        dict
    }

    fn panel_for(dict: &Dictionary) -> DictionaryPanel {
        let mut panel = DictionaryPanel::new();
        panel.show(Some(dict));
        panel
    }

    fn type_draft(panel: &mut DictionaryPanel, from: &str, to: &str) {
        let editor = panel.editor.as_mut().unwrap();
        editor.draft = RowDraft::new(from, to);
    }

    #[test]
    fn test_show_selects_first_row() {
        let dict = dictionary(&[("a", "x"), ("b", "y")]);
        let panel = panel_for(&dict);
        assert_eq!(panel.dictionary, Some(dict.id));
        assert_eq!(panel.selected_index(), Some(0));
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_switching_dictionary_closes_editor() {
        let dict = dictionary(&[("a", "x")]);
        let mut panel = panel_for(&dict);
        panel.start_edit(&dict);
        assert!(panel.is_editing());

        let other = Dictionary::new(DictionaryId(2), "Other", "");
        panel.show(Some(&other));
        assert!(!panel.is_editing());
        assert_eq!(panel.selected_index(), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let dict = dictionary(&[("a", "x"), ("b", "y"), ("c", "z")]);
        let mut panel = panel_for(&dict);
        panel.previous_row(3);
        assert_eq!(panel.selected_index(), Some(2));
        panel.next_row(3);
        assert_eq!(panel.selected_index(), Some(0));
        panel.select_last(3);
        assert_eq!(panel.selected_index(), Some(2));
    }

    #[test]
    fn test_save_unique_row_commits_draft() {
        let dict = dictionary(&[("a", "x"), ("b", "y")]);
        let mut panel = panel_for(&dict);
        panel.next_row(2);
        panel.start_edit(&dict);
        type_draft(&mut panel, "b", "z");

        let action = panel.save_row(&dict);
        assert_eq!(
            action,
            Some(Action::EditRow {
                dictionary: dict.id,
                row: dict.rows[1].id,
                draft: RowDraft::new("b", "z"),
            })
        );
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_save_fork_is_rejected_and_stays_editing() {
        let dict = dictionary(&[("a", "x"), ("a", "y")]);
        let mut panel = panel_for(&dict);
        panel.next_row(2);
        panel.start_edit(&dict);
        type_draft(&mut panel, "a", "z");

        assert_eq!(panel.save_row(&dict), None);
        assert!(panel.is_editing());
        let err = panel.validation_error().unwrap();
        assert_eq!(err.kind, ValidationKind::Fork);
        assert!(panel.has_error(0));
        assert!(panel.has_error(1));
    }

    #[test]
    fn test_save_clone_flags_both_rows() {
        let dict = dictionary(&[("a", "x"), ("b", "y")]);
        let mut panel = panel_for(&dict);
        panel.next_row(2);
        panel.start_edit(&dict);
        type_draft(&mut panel, "a", "x");

        assert_eq!(panel.save_row(&dict), None);
        assert_eq!(panel.validation_error().unwrap().kind, ValidationKind::Clone);
        assert!(panel.has_error(0) && panel.has_error(1));
    }

    #[test]
    fn test_save_empty_is_rejected() {
        let dict = dictionary(&[("", "")]);
        let mut panel = panel_for(&dict);
        panel.start_edit(&dict);
        type_draft(&mut panel, "a", "");

        assert_eq!(panel.save_row(&dict), None);
        assert_eq!(panel.validation_error().unwrap().kind, ValidationKind::Empty);
        assert!(panel.has_error(0));
    }

    #[test]
    fn test_entering_edit_mode_clears_stale_error() {
        let dict = dictionary(&[("a", "x"), ("a", "y")]);
        let mut panel = panel_for(&dict);
        panel.next_row(2);
        panel.start_edit(&dict);
        type_draft(&mut panel, "a", "z");
        panel.save_row(&dict);
        assert!(panel.validation_error().is_some());

        panel.select_first(2);
        panel.start_edit(&dict);
        assert!(panel.validation_error().is_none());
        assert!(!panel.has_error(0) && !panel.has_error(1));
    }

    #[test]
    fn test_delete_bypasses_validation_and_clears_error() {
        let dict = dictionary(&[("a", "x"), ("a", "x")]);
        let mut panel = panel_for(&dict);
        panel.start_edit(&dict);
        panel.save_row(&dict);
        assert!(panel.validation_error().is_some());

        let action = panel.request_delete_row(&dict);
        assert_eq!(
            action,
            Some(Action::DeleteRow {
                dictionary: dict.id,
                row: dict.rows[0].id,
            })
        );
        assert!(!panel.is_editing());
        assert!(panel.validation_error().is_none());
    }

    #[test]
    fn test_delete_selected_row_in_static_mode() {
        let dict = dictionary(&[("", ""), ("b", "y")]);
        let mut panel = panel_for(&dict);
        panel.next_row(2);
        assert_eq!(
            panel.request_delete_row(&dict),
            Some(Action::DeleteRow {
                dictionary: dict.id,
                row: dict.rows[1].id,
            })
        );
    }

    #[test]
    fn test_added_row_opens_in_edit_mode() {
        let mut dict = dictionary(&[("a", "x")]);
        let mut panel = panel_for(&dict);
        assert_eq!(panel.request_add_row(), Some(Action::AddRow(dict.id)));

        let new_row = Row::empty();
        let new_id = new_row.id;
        dict.rows.push(new_row);
        panel.row_added(&dict, new_id);

        let editor = panel.editor.as_ref().unwrap();
        assert_eq!(editor.row_id, new_id);
        assert_eq!(editor.draft, RowDraft::default());
        assert_eq!(panel.selected_index(), Some(1));
    }

    #[test]
    fn test_row_added_without_request_is_ignored() {
        let mut dict = dictionary(&[]);
        let mut panel = panel_for(&dict);
        let row = Row::empty();
        let id = row.id;
        dict.rows.push(row);
        panel.row_added(&dict, id);
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_delete_dictionary_opens_confirmation() {
        let dict = dictionary(&[]);
        let panel = panel_for(&dict);
        assert_eq!(
            panel.request_delete_dictionary(),
            Some(Modal::DeleteDictionaryConfirm { dictionary: dict.id })
        );
        assert_eq!(DictionaryPanel::new().request_delete_dictionary(), None);
    }

    #[test]
    fn test_keys_route_to_editor_while_editing() {
        let dict = dictionary(&[("a", "x")]);
        let mut panel = panel_for(&dict);
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        assert_eq!(panel.handle_key_event(a).unwrap(), Some(Action::RequestAddRow));
        panel.start_edit(&dict);
        assert_eq!(panel.handle_key_event(a).unwrap(), Some(Action::EditInput('a')));

        panel.update(Action::EditInput('b')).unwrap();
        assert_eq!(panel.editor.as_ref().unwrap().draft.from, "ab");
        panel.update(Action::CancelEdit).unwrap();
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_draw_highlights_errors_without_panicking() {
        let dict = dictionary(&[("a", "x"), ("a", "y")]);
        let mut panel = panel_for(&dict);
        panel.start_edit(&dict);
        type_draft(&mut panel, "a", "z");
        panel.save_row(&dict);

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                panel
                    .draw_with_dictionary(frame, frame.area(), Some(&dict))
                    .unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("different translation"));
    }

    #[test]
    fn test_column_widths_cap_very_long_cells() {
        let long = "a".repeat(65_537);
        let dict = dictionary(&[(long.as_str(), "x")]);
        let (from_width, to_width) = column_widths(&dict, None);
        assert_eq!(from_width, MAX_COLUMN_WIDTH);
        assert_eq!(to_width, 6);
    }
}
