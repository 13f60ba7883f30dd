//! Dictionary list component - left-hand navigation

use crate::model::{Dictionary, DictionaryId};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// List of dictionaries with a single selection
#[derive(Default)]
pub struct DictionaryList {
    pub list_state: ListState,
}

impl DictionaryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected<'a>(&self, dictionaries: &'a [Dictionary]) -> Option<&'a Dictionary> {
        self.list_state.selected().and_then(|i| dictionaries.get(i))
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| (i + 1) % len);
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(prev));
    }

    /// Select the dictionary with `id`, if present
    pub fn select_id(&mut self, dictionaries: &[Dictionary], id: DictionaryId) {
        if let Some(index) = dictionaries.iter().position(|d| d.id == id) {
            self.list_state.select(Some(index));
        }
    }

    /// Keep the selection in range after the list shrank or grew
    pub fn clamp(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        dictionaries: &[Dictionary],
        focused: bool,
    ) {
        let items: Vec<ListItem> = dictionaries
            .iter()
            .map(|dict| {
                ListItem::new(Line::from(vec![
                    Span::styled(dict.title.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!(" ({})", dict.rows.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Dictionaries ({}) ", dictionaries.len()))
                    .border_style(Style::default().fg(border_color)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionaries(n: u32) -> Vec<Dictionary> {
        (1..=n)
            .map(|i| Dictionary::new(DictionaryId(i), format!("D{}", i), ""))
            .collect()
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let dicts = dictionaries(3);
        let mut list = DictionaryList::new();
        list.clamp(dicts.len());
        assert_eq!(list.selected(&dicts).map(|d| d.id), Some(DictionaryId(1)));

        list.previous(dicts.len());
        assert_eq!(list.selected(&dicts).map(|d| d.id), Some(DictionaryId(3)));
        list.next(dicts.len());
        assert_eq!(list.selected(&dicts).map(|d| d.id), Some(DictionaryId(1)));
    }

    #[test]
    fn test_clamp_after_removal() {
        let mut dicts = dictionaries(2);
        let mut list = DictionaryList::new();
        list.select_id(&dicts, DictionaryId(2));
        dicts.pop();
        list.clamp(dicts.len());
        assert_eq!(list.selected(&dicts).map(|d| d.id), Some(DictionaryId(1)));
        dicts.clear();
        list.clamp(0);
        assert_eq!(list.selected(&dicts).map(|d| d.id), None);
    }
}
