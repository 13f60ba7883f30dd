//! New dictionary dialog component
//!
//! Two-field form (title, description). Submitting emits a store command;
//! the App reports a rejected title back through `set_error`.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
}

impl FormField {
    fn toggle(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        }
    }
}

/// Form for creating a dictionary
#[derive(Debug, Default)]
pub struct NewDictionaryDialog {
    pub title: String,
    pub description: String,
    pub field: FormField,
    pub error: Option<String>,
}

impl NewDictionaryDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the form for a fresh entry
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn active_input(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }

    fn input_line(&self, field: FormField, label: &str, value: &str) -> Line<'static> {
        let active = self.field == field;
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:13}", label), label_style),
            Span::styled(
                format!("{}{}", value, cursor),
                Style::default().fg(Color::White),
            ),
        ])
    }
}

impl Component for NewDictionaryDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::CreateDictionary {
                title: self.title.clone(),
                description: self.description.clone(),
            }),
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = self.field.toggle();
                None
            }
            KeyCode::Backspace => {
                self.active_input().pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.active_input().push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 10);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New Dictionary ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Inputs
                Constraint::Length(2), // Error
                Constraint::Min(1),    // Help
            ])
            .split(inner);

        let inputs = Paragraph::new(vec![
            self.input_line(FormField::Title, "Title:", &self.title),
            self.input_line(FormField::Description, "Description:", &self.description),
        ]);
        frame.render_widget(inputs, chunks[1]);

        if let Some(ref error) = self.error {
            let error = Paragraph::new(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(error, chunks[2]);
        }

        let help = Paragraph::new(Line::from(Span::styled(
            " Enter  Create   Tab  Switch field   Esc  Cancel",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(help, chunks[3]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut NewDictionaryDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_typing_fills_both_fields() {
        let mut dialog = NewDictionaryDialog::new();
        press(&mut dialog, KeyCode::Char('F'));
        press(&mut dialog, KeyCode::Char('R'));
        press(&mut dialog, KeyCode::Tab);
        press(&mut dialog, KeyCode::Char('x'));
        press(&mut dialog, KeyCode::Backspace);
        press(&mut dialog, KeyCode::Char('y'));

        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::CreateDictionary {
                title: "FR".to_string(),
                description: "y".to_string(),
            })
        );
    }

    #[test]
    fn test_typing_clears_error_and_reset_clears_form() {
        let mut dialog = NewDictionaryDialog::new();
        dialog.set_error("Dictionary title cannot be empty");
        press(&mut dialog, KeyCode::Char('a'));
        assert!(dialog.error.is_none());

        dialog.reset();
        assert!(dialog.title.is_empty());
        assert_eq!(dialog.field, FormField::Title);
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }
}
