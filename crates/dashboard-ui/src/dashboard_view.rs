//! Full-screen dashboard layout.
//!
//! Stacks the header, the editable date-range bar, the metric cards, both
//! charts and a footer that carries either the key help or a status message.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use dashboard_data::analysis::DashboardReport;

use crate::charts::{render_hourly_chart, render_monthly_chart};
use crate::components::header::Header;
use crate::components::metrics::render_metrics;
use crate::themes::Theme;

pub const KEY_HELP: &str =
    "Tab: switch field | Left/Right: -/+ day | Up/Down: -/+ month | r: reset | q: quit";

/// Which end of the range the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
}

impl RangeField {
    pub fn toggle(self) -> Self {
        match self {
            RangeField::Start => RangeField::End,
            RangeField::End => RangeField::Start,
        }
    }
}

/// Range being edited. May be inverted until it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Everything the dashboard screen needs for one frame.
pub struct DashboardViewData<'a> {
    pub report: &'a DashboardReport,
    /// `None` when the data has no rows at all.
    pub draft: Option<DraftRange>,
    pub editing: RangeField,
    /// Replaces the key help while set.
    pub status: Option<&'a str>,
}

/// Render the dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Header::new(theme).to_lines()), chunks[0]);
    frame.render_widget(Paragraph::new(range_line(data, theme)), chunks[1]);
    render_metrics(frame, chunks[2], &data.report.totals, theme);
    render_monthly_chart(frame, chunks[3], &data.report.monthly, theme);
    render_hourly_chart(frame, chunks[4], &data.report.hourly, theme);
    frame.render_widget(Paragraph::new(footer_line(data, theme)), chunks[5]);
}

/// `Date range: [start] to [end]  (N rows)` with the edited field highlighted.
pub fn range_line<'a>(data: &DashboardViewData, theme: &Theme) -> Line<'a> {
    let Some(draft) = data.draft else {
        return Line::from(vec![
            Span::styled("Date range: ", theme.label),
            Span::styled("no data", theme.warning),
        ]);
    };

    let field_style = |field: RangeField| {
        if data.editing == field {
            theme.range_active
        } else {
            theme.range_inactive
        }
    };

    Line::from(vec![
        Span::styled("Date range: ", theme.label),
        Span::styled(format!("[{}]", draft.start), field_style(RangeField::Start)),
        Span::styled(" to ", theme.label),
        Span::styled(format!("[{}]", draft.end), field_style(RangeField::End)),
        Span::styled(format!("  ({} rows)", data.report.rows), theme.dim),
    ])
}

fn footer_line<'a>(data: &DashboardViewData, theme: &Theme) -> Line<'a> {
    match data.status {
        Some(status) => Line::from(Span::styled(status.to_string(), theme.error)),
        None => Line::from(Span::styled(KEY_HELP, theme.dim)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
