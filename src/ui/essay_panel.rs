//! The "Your Essay" panel: draft editor, error box and submit button

use crate::controller::ControllerSnapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const PLACEHOLDER: &str = "Paste your essay here for analysis...";
const CURSOR: &str = "█";

pub fn render(f: &mut Frame<'_>, area: Rect, snapshot: &ControllerSnapshot) {
    let block = Block::default()
        .title(" Your Essay ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Indexed(62)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let error_height = if snapshot.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(error_height),
            Constraint::Length(3),
        ])
        .split(inner);

    render_editor(f, chunks[0], snapshot);

    if let Some(error) = &snapshot.error {
        let error_box = Paragraph::new(Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(Color::Red)),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        )
        .wrap(Wrap { trim: true });
        f.render_widget(error_box, chunks[1]);
    }

    render_submit_button(f, chunks[2], snapshot);
}

fn render_editor(f: &mut Frame<'_>, area: Rect, snapshot: &ControllerSnapshot) {
    let editor_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let text_area = editor_block.inner(area);

    let paragraph = if snapshot.draft.is_empty() {
        Paragraph::new(Line::from(vec![
            Span::styled(CURSOR, Style::default().fg(Color::Indexed(62))),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ]))
    } else {
        let scroll = scroll_offset(&snapshot.draft, text_area.width, text_area.height);
        Paragraph::new(draft_lines(&snapshot.draft)).scroll((scroll, 0))
    };

    f.render_widget(
        paragraph
            .block(editor_block)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::White)),
        area,
    );
}

/// Draft lines as drawn, with the cursor after the last character
fn draft_lines(draft: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = draft
        .split('\n')
        .map(|line| Line::from(line.replace('\t', "    ")))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled(CURSOR, Style::default().fg(Color::Indexed(62))));
    }
    lines
}

fn render_submit_button(f: &mut Frame<'_>, area: Rect, snapshot: &ControllerSnapshot) {
    let (label, style) = if snapshot.pending {
        ("⟳ Analyzing...", Style::default().fg(Color::White).bg(Color::DarkGray))
    } else if snapshot.can_submit() {
        (
            "✦ Grade Essay  (Ctrl+S)",
            Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(62))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("✦ Grade Essay", Style::default().fg(Color::Gray).bg(Color::DarkGray))
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

/// Lines to scroll so the end of the draft stays visible.
///
/// Rows are counted with the same word wrapping the editor renders with.
pub fn scroll_offset(draft: &str, width: u16, height: u16) -> u16 {
    if width == 0 || height == 0 {
        return 0;
    }

    let rows = Paragraph::new(draft_lines(draft))
        .wrap(Wrap { trim: false })
        .line_count(width);

    rows.saturating_sub(height as usize).min(u16::MAX as usize) as u16
}
