//! Scores and feedback panels

use crate::grading::GradingResult;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

const EMPTY_HINT: &str = "Submit your essay to receive detailed AI analysis and feedback";
const ACCENT: Color = Color::Indexed(62);

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
}

fn render_placeholder(f: &mut Frame<'_>, area: Rect) {
    let vertical_pad = area.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::from(""); vertical_pad as usize];
    lines.push(Line::from(Span::styled("📖", Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(Span::styled(EMPTY_HINT, Style::default().fg(Color::Gray))));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// "Grading And Scores": grade and percentage gauges
pub fn render_scores(f: &mut Frame<'_>, area: Rect, result: Option<&GradingResult>) {
    let block = panel(" Grading And Scores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(result) = result else {
        render_placeholder(f, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let gauge = |title: &'static str, ratio: f64, label: String| {
        Gauge::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .gauge_style(Style::default().fg(ACCENT).bg(Color::Indexed(254)))
            .ratio(ratio)
            .label(Span::styled(
                label,
                Style::default().add_modifier(Modifier::BOLD),
            ))
    };

    f.render_widget(
        gauge(" Grade ", result.grade_ratio(), result.grade_label()),
        chunks[1],
    );
    f.render_widget(
        gauge(" Score ", result.percentage_ratio(), result.percentage_label()),
        chunks[3],
    );
}

/// "AI Analysis and Feedback": grammar, vocabulary, readability and feedback text
pub fn render_feedback(f: &mut Frame<'_>, area: Rect, result: Option<&GradingResult>) {
    let block = panel(" AI Analysis and Feedback ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(result) = result else {
        render_placeholder(f, inner);
        return;
    };

    let heading = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let detail = Style::default().fg(Color::Gray);

    let metric = |icon: &'static str, color: Color, title: &'static str, value: String| {
        vec![
            Line::from(vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::raw(" "),
                Span::styled(title, heading),
            ]),
            Line::from(Span::styled(format!("  {}", value), detail)),
            Line::from(""),
        ]
    };

    let mut lines = Vec::new();
    lines.extend(metric("⚠", Color::Yellow, "Grammar Check", result.grammar_label()));
    lines.extend(metric("◆", Color::Magenta, "Vocabulary Diversity", result.vocabulary_label()));
    lines.extend(metric("📖", Color::Blue, "Readability Score", result.readability_label()));
    lines.push(Line::from(vec![
        Span::styled("✦", Style::default().fg(ACCENT)),
        Span::raw(" "),
        Span::styled("AI Feedback", heading),
    ]));
    lines.push(Line::from(Span::styled(
        result.feedback.clone(),
        Style::default().fg(Color::White),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
