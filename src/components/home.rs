//! Home screen - dictionary list, dictionary panel, status and help bars

use crate::components::{calculate_main_layout, DictionaryList, DictionaryPanel};
use crate::model::Dictionary;
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub dictionaries: &'a [Dictionary],
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    list: &mut DictionaryList,
    panel: &mut DictionaryPanel,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    list.draw(frame, layout.list, ctx.dictionaries, !panel.is_editing());
    let selected = list.selected(ctx.dictionaries);
    panel.draw_with_dictionary(frame, layout.panel, selected)?;

    render_status_bar(frame, layout.status, selected, ctx);
    render_help_bar(frame, layout.help, panel);

    Ok(())
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    selected: Option<&Dictionary>,
    ctx: &HomeRenderContext,
) {
    let mut spans = vec![Span::styled(
        " dict-tui ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(dict) = selected {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            dict.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", dict.id),
            Style::default().fg(Color::DarkGray),
        ));
    }

    // Error replaces everything but the badge
    if let Some(error) = ctx.error {
        spans.truncate(1);
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hint(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, panel: &DictionaryPanel) {
    let help_spans = if panel.is_editing() {
        vec![
            key_hint("Enter", Color::Green),
            Span::raw("Save  "),
            key_hint("Esc", Color::Yellow),
            Span::raw("Discard  "),
            key_hint("Tab", Color::Cyan),
            Span::raw("Switch field  "),
            key_hint("Ctrl+d", Color::Red),
            Span::raw("Delete row"),
        ]
    } else {
        vec![
            key_hint("q", Color::Yellow),
            Span::raw("Quit "),
            key_hint("a", Color::Green),
            Span::raw("Add row "),
            key_hint("e", Color::Cyan),
            Span::raw("Edit "),
            key_hint("x", Color::Red),
            Span::raw("Delete row "),
            key_hint("Tab", Color::Cyan),
            Span::raw("Next dictionary "),
            key_hint("n", Color::Magenta),
            Span::raw("New "),
            key_hint("D", Color::Red),
            Span::raw("Delete dictionary "),
            key_hint("?", Color::White),
            Span::raw("Help"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
