//! Line charts for the monthly trend and the working-day hourly profile.
//!
//! Both charts are ratatui [`Chart`] widgets drawn with braille markers. The
//! hourly chart is replaced by the "column not found" message when the data
//! has no hour column.

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap},
    Frame,
};

use dashboard_core::formatting::format_count;
use dashboard_data::aggregator::{
    HourlyPoint, HourlyProfile, MonthlyPoint, HOURLY_UNAVAILABLE_MESSAGE,
};

use crate::themes::Theme;

pub const MONTHLY_TITLE: &str = " Monthly Rental Trend ";
pub const HOURLY_TITLE: &str = " Hourly Rentals on Working Days: Casual vs Registered ";
pub const NO_ROWS_MESSAGE: &str = "No rentals in the selected range";

// ── Point helpers ─────────────────────────────────────────────────────────────

/// Monthly series as `(months since first point, total)` pairs.
///
/// Gaps in a sparse series keep their width on the x axis.
pub fn monthly_points(series: &[MonthlyPoint]) -> Vec<(f64, f64)> {
    let Some(first) = series.first() else {
        return Vec::new();
    };
    let origin = month_index(first);
    series
        .iter()
        .map(|p| ((month_index(p) - origin) as f64, p.total_cnt as f64))
        .collect()
}

fn month_index(point: &MonthlyPoint) -> i32 {
    point.month_end.year() * 12 + point.month_end.month0() as i32
}

/// Hourly means split into `(casual, registered)` series keyed by hour.
pub fn hourly_points(points: &[HourlyPoint]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    points
        .iter()
        .map(|p| {
            let x = f64::from(p.hour);
            ((x, p.mean_casual), (x, p.mean_registered))
        })
        .unzip()
}

/// Upper y bound with 10 % headroom, never below 1.
pub fn y_upper_bound<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> f64 {
    let max = series
        .into_iter()
        .flat_map(|s| s.iter().map(|&(_, y)| y))
        .fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

fn y_labels(upper: f64) -> Vec<String> {
    [0.0, upper / 2.0, upper]
        .iter()
        .map(|v| format_count(v.round() as u64))
        .collect()
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the monthly total trend, or a placeholder for an empty range.
pub fn render_monthly_chart(frame: &mut Frame, area: Rect, series: &[MonthlyPoint], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.separator)
        .title(Span::styled(MONTHLY_TITLE, theme.header));

    if series.is_empty() {
        render_message(frame, area, block, NO_ROWS_MESSAGE, theme.warning);
        return;
    }

    let points = monthly_points(series);
    let x_upper = points.last().map(|&(x, _)| x).unwrap_or(0.0).max(1.0);
    let y_upper = y_upper_bound([points.as_slice()]);

    let first = series[0].month_end.format("%b %Y").to_string();
    let last = series[series.len() - 1].month_end.format("%b %Y").to_string();

    let datasets = vec![Dataset::default()
        .name("Total Count")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_total)
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(None)
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, x_upper])
                .labels([first, last]),
        )
        .y_axis(
            Axis::default()
                .title("Total Count")
                .style(theme.chart_axis)
                .bounds([0.0, y_upper])
                .labels(y_labels(y_upper)),
        );
    frame.render_widget(chart, area);
}

/// Render mean casual and registered rentals per hour on working days.
///
/// [`HourlyProfile::Unavailable`] shows the hour-column message instead.
pub fn render_hourly_chart(frame: &mut Frame, area: Rect, profile: &HourlyProfile, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.separator)
        .title(Span::styled(HOURLY_TITLE, theme.header));

    let points = match profile.points() {
        Ok(points) => points,
        Err(_) => {
            render_message(frame, area, block, HOURLY_UNAVAILABLE_MESSAGE, theme.error);
            return;
        }
    };
    if points.is_empty() {
        render_message(frame, area, block, NO_ROWS_MESSAGE, theme.warning);
        return;
    }

    let (casual, registered) = hourly_points(points);
    let y_upper = y_upper_bound([casual.as_slice(), registered.as_slice()]);

    let datasets = vec![
        Dataset::default()
            .name("Registered")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_registered)
            .data(&registered),
        Dataset::default()
            .name("Casual")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_casual)
            .data(&casual),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title("Hour of Day")
                .style(theme.chart_axis)
                .bounds([0.0, 23.0])
                .labels((0..24).map(|h| h.to_string())),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, y_upper])
                .labels(y_labels(y_upper)),
        );
    frame.render_widget(chart, area);
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    message: &'static str,
    style: ratatui::style::Style,
) {
    let text = vec![Line::from(""), Line::from(Span::styled(message, style))];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn month(y: i32, m: u32, d: u32, total: u64) -> MonthlyPoint {
        MonthlyPoint {
            month_end: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            total_cnt: total,
        }
    }

    fn hour(h: u8, casual: f64, registered: f64) -> HourlyPoint {
        HourlyPoint {
            hour: h,
            mean_casual: casual,
            mean_registered: registered,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_monthly_points_keep_gaps() {
        let series = [
            month(2011, 11, 30, 10),
            month(2011, 12, 31, 20),
            month(2012, 3, 31, 30),
        ];
        assert_eq!(
            monthly_points(&series),
            vec![(0.0, 10.0), (1.0, 20.0), (4.0, 30.0)]
        );
        assert!(monthly_points(&[]).is_empty());
    }

    #[test]
    fn test_hourly_points_split_series() {
        let (casual, registered) = hourly_points(&[hour(5, 2.0, 8.0), hour(17, 50.5, 300.0)]);
        assert_eq!(casual, vec![(5.0, 2.0), (17.0, 50.5)]);
        assert_eq!(registered, vec![(5.0, 8.0), (17.0, 300.0)]);
    }

    #[test]
    fn test_y_upper_bound() {
        let a = [(0.0, 100.0)];
        let b = [(0.0, 50.0), (1.0, 200.0)];
        assert!((y_upper_bound([a.as_slice(), b.as_slice()]) - 220.0).abs() < 1e-9);
        let empty: [(f64, f64); 0] = [];
        assert_eq!(y_upper_bound([empty.as_slice()]), 1.0);
    }

    #[test]
    fn test_render_monthly_chart_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let theme = Theme::dark();
        let series = [month(2011, 1, 31, 38_189), month(2011, 2, 28, 48_215)];
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &series, &theme);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("Monthly Rental Trend"));
    }

    #[test]
    fn test_render_single_month_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let theme = Theme::classic();
        let series = [month(2011, 1, 31, 20)];
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &series, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_monthly_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &[], &theme);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains(NO_ROWS_MESSAGE));
    }

    #[test]
    fn test_render_hourly_chart_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let theme = Theme::light();
        let profile = HourlyProfile::Available(vec![hour(0, 1.0, 20.0), hour(8, 10.0, 400.0)]);
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_hourly_chart(frame, area, &profile, &theme);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("Hourly Rentals"));
    }

    #[test]
    fn test_render_hourly_unavailable_shows_message() {
        let mut terminal = Terminal::new(TestBackend::new(120, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_hourly_chart(frame, area, &HourlyProfile::Unavailable, &theme);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("Column 'hr' not found."));
    }

    #[test]
    fn test_render_hourly_empty_profile_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_hourly_chart(frame, area, &HourlyProfile::Available(vec![]), &theme);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains(NO_ROWS_MESSAGE));
    }
}
