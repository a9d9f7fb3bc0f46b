//! Metric cards for the three rental totals.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::formatting::{format_count, percentage};
use dashboard_data::aggregator::Totals;

use crate::themes::Theme;

/// A single titled value, e.g. "Casual" / "1,234".
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    /// Share of total rentals, omitted for the total itself.
    pub share: Option<f64>,
}

impl MetricCard {
    /// The three cards in display order: total, casual, registered.
    pub fn from_totals(totals: &Totals) -> [MetricCard; 3] {
        let whole = totals.total_cnt as f64;
        [
            MetricCard {
                title: "Total Rentals",
                value: format_count(totals.total_cnt),
                share: None,
            },
            MetricCard {
                title: "Casual",
                value: format_count(totals.total_casual),
                share: Some(percentage(totals.total_casual as f64, whole, 1)),
            },
            MetricCard {
                title: "Registered",
                value: format_count(totals.total_registered),
                share: Some(percentage(totals.total_registered as f64, whole, 1)),
            },
        ]
    }

    fn to_lines<'a>(&self, theme: &Theme) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(Span::styled(self.value.clone(), theme.metric_value))];
        if let Some(share) = self.share {
            lines.push(Line::from(Span::styled(
                format!("{share:.1}% of total"),
                theme.dim,
            )));
        }
        lines
    }
}

/// Render the three cards side by side.
pub fn render_metrics(frame: &mut Frame, area: Rect, totals: &Totals, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (card, column) in MetricCard::from_totals(totals).iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.metric_border)
            .title(Span::styled(format!(" {} ", card.title), theme.metric_title));
        frame.render_widget(
            Paragraph::new(card.to_lines(theme))
                .alignment(Alignment::Center)
                .block(block),
            *column,
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
