//! Row editor component
//!
//! Holds the staged values for the one row being edited. Nothing typed here
//! reaches the store until the panel validates the draft and emits a commit.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Row, RowDraft, RowField, RowId, ValidationError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Editing session for a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEditor {
    /// Row being edited
    pub row_id: RowId,
    /// Staged values
    pub draft: RowDraft,
    /// Field receiving input
    pub field: RowField,
    /// Result of this session's last rejected save
    pub last_attempt: Option<ValidationError>,
}

impl RowEditor {
    /// Open an editor staged with the row's committed values
    pub fn open(row: &Row) -> Self {
        Self {
            row_id: row.id,
            draft: row.draft(),
            field: RowField::From,
            last_attempt: None,
        }
    }

    pub fn input(&mut self, c: char) {
        self.draft.field_mut(self.field).push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.field_mut(self.field).pop();
    }

    pub fn switch_field(&mut self) {
        self.field = self.field.toggle();
    }

    pub fn has_error(&self, row_index: usize) -> bool {
        self.last_attempt
            .as_ref()
            .is_some_and(|err| err.contains(row_index))
    }

    /// Render the draft as the cells of an editing row
    pub fn cells(&self, has_error: bool) -> [Line<'static>; 2] {
        [
            self.field_line(RowField::From, has_error),
            self.field_line(RowField::To, has_error),
        ]
    }

    fn field_line(&self, field: RowField, has_error: bool) -> Line<'static> {
        let value = self.draft.field(field).to_string();
        let active = self.field == field;

        let mut style = Style::default().fg(Color::White).bg(Color::DarkGray);
        if has_error {
            style = style.fg(Color::LightRed);
        }
        if active {
            style = style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![];
        if value.is_empty() && !active {
            spans.push(Span::styled(
                field.label().to_string(),
                Style::default().fg(Color::Gray).bg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(value, style));
        }
        if active {
            spans.push(Span::styled(
                "▏",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Line::from(spans)
    }
}

impl Component for RowEditor {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => Some(Action::SaveRow),
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchField),
            KeyCode::Backspace => Some(Action::EditBackspace),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::RequestDeleteRow)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::EditInput(c))
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EditInput(c) => self.input(c),
            Action::EditBackspace => self.backspace(),
            Action::SwitchField => self.switch_field(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Editing rows are drawn inside the dictionary panel's table
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_open_stages_committed_values() {
        let row = Row::new("cat", "gato");
        let editor = RowEditor::open(&row);
        assert_eq!(editor.row_id, row.id);
        assert_eq!(editor.draft, RowDraft::new("cat", "gato"));
        assert_eq!(editor.field, RowField::From);
        assert!(editor.last_attempt.is_none());
    }

    #[test]
    fn test_typing_changes_only_active_field() {
        let row = Row::new("cat", "gato");
        let mut editor = RowEditor::open(&row);

        editor.update(Action::EditInput('s')).unwrap();
        editor.update(Action::SwitchField).unwrap();
        editor.update(Action::EditBackspace).unwrap();
        editor.update(Action::EditBackspace).unwrap();
        editor.update(Action::EditInput('a')).unwrap();

        assert_eq!(editor.draft, RowDraft::new("cats", "gaa"));
        // The committed row is untouched
        assert_eq!(row.to, "gato");
    }

    #[test]
    fn test_key_mapping() {
        let row = Row::empty();
        let mut editor = RowEditor::open(&row);
        assert_eq!(editor.handle_key_event(key(KeyCode::Enter)).unwrap(), Some(Action::SaveRow));
        assert_eq!(editor.handle_key_event(key(KeyCode::Esc)).unwrap(), Some(Action::CancelEdit));
        assert_eq!(editor.handle_key_event(key(KeyCode::Tab)).unwrap(), Some(Action::SwitchField));
        assert_eq!(
            editor.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::EditInput('q'))
        );
        assert_eq!(
            editor
                .handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::RequestDeleteRow)
        );
    }
}
