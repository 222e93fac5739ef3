pub mod essay_panel;
pub mod layout;
pub mod results_panel;

use crate::controller::ControllerSnapshot;
use layout::AppLayout;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the grading form from a controller snapshot
pub struct UI {
    layout: AppLayout,
}

impl UI {
    pub fn new() -> Self {
        Self {
            layout: AppLayout::new(),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, snapshot: &ControllerSnapshot) {
        let areas = self.layout.calculate_layout(f.size());

        self.render_header(f, areas.header);
        essay_panel::render(f, areas.essay, snapshot);
        results_panel::render_scores(f, areas.scores, snapshot.result.as_ref());
        results_panel::render_feedback(f, areas.feedback, snapshot.result.as_ref());
        self.render_footer(f, areas.footer, snapshot);
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "✎ AI Essay Grading",
                Style::default()
                    .fg(Color::Indexed(62))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Get instant, comprehensive feedback on your essays using advanced AI analysis",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_footer(&self, f: &mut Frame<'_>, area: Rect, snapshot: &ControllerSnapshot) {
        let mut spans = vec![Span::styled(
            "Ctrl+S grade · Ctrl+V paste · Ctrl+U clear · Esc quit",
            Style::default().fg(Color::DarkGray),
        )];

        if let Some(settled_at) = snapshot.settled_at {
            spans.push(Span::styled(
                format!("  |  last attempt {}", settled_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}
