use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas for the grading form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormAreas {
    pub header: Rect,
    pub essay: Rect,
    pub scores: Rect,
    pub feedback: Rect,
    pub footer: Rect,
}

pub struct AppLayout {
    essay_width_ratio: u16,
    scores_width_ratio: u16,
}

impl AppLayout {
    pub fn new() -> Self {
        Self {
            essay_width_ratio: 40,
            scores_width_ratio: 25,
        }
    }

    pub fn calculate_layout(&self, area: Rect) -> FormAreas {
        // Header, panels, key hints
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        // [Essay | Scores | Feedback]
        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(self.essay_width_ratio),
                Constraint::Percentage(self.scores_width_ratio),
                Constraint::Min(20),
            ])
            .split(vertical_chunks[1]);

        FormAreas {
            header: vertical_chunks[0],
            essay: horizontal_chunks[0],
            scores: horizontal_chunks[1],
            feedback: horizontal_chunks[2],
            footer: vertical_chunks[2],
        }
    }
}

impl Default for AppLayout {
    fn default() -> Self {
        Self::new()
    }
}
