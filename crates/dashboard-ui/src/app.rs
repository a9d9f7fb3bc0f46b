//! Application state and TUI event loop for the bike sharing dashboard.
//!
//! [`App`] owns the loaded table, the range being edited and the report for
//! the last valid range. Every edit re-runs the pipeline; an invalid edit
//! leaves the previous report on screen and reports the problem in the
//! footer.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{debug, warn};

use dashboard_core::models::{DateRange, RentalTable};
use dashboard_core::time_utils::{clamp_date, shift_days, shift_months};
use dashboard_core::{DashboardError, Result};
use dashboard_data::analysis::{build_report, DashboardReport};

use crate::dashboard_view::{self, DashboardViewData, DraftRange, RangeField};
use crate::themes::Theme;

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    table: RentalTable,
    /// Earliest and latest date in the table; edits are clamped to it.
    bounds: Option<DateRange>,
    draft: Option<DraftRange>,
    editing: RangeField,
    report: DashboardReport,
    status: Option<String>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Build the app and its first report.
    ///
    /// `initial` is the range resolved from the command line; `None` selects
    /// the table's full bounds.
    pub fn new(theme_name: &str, table: RentalTable, initial: Option<DateRange>) -> Self {
        let bounds = table.date_bounds();
        let range = initial.or(bounds);
        let report = match range {
            Some(range) => build_report(&table, range),
            None => DashboardReport::full(&table),
        };
        Self {
            theme: Theme::from_name(theme_name),
            draft: range.map(|r| DraftRange {
                start: r.start,
                end: r.end,
            }),
            table,
            bounds,
            editing: RangeField::Start,
            report,
            status: None,
            should_quit: false,
        }
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    pub fn draft(&self) -> Option<DraftRange> {
        self.draft
    }

    pub fn editing(&self) -> RangeField {
        self.editing
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Q` or `Ctrl+C`.
    pub fn run_dashboard(mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut terminal = setup_or_restore(enter_alternate_screen, || {
            let _ = restore_terminal();
        })?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(terminal_error(e));
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(terminal_error(e)),
                },
                Ok(false) => {}
                Err(e) => break Err(terminal_error(e)),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        restore_terminal().map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.editing = self.editing.toggle(),
            KeyCode::Left => self.move_field(|date| shift_days(date, -1)),
            KeyCode::Right => self.move_field(|date| shift_days(date, 1)),
            KeyCode::Down => self.move_field(|date| shift_months(date, -1)),
            KeyCode::Up => self.move_field(|date| shift_months(date, 1)),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => {}
        }
    }

    /// Restore the full data range.
    pub fn reset(&mut self) {
        if let Some(bounds) = self.bounds {
            self.draft = Some(DraftRange {
                start: bounds.start,
                end: bounds.end,
            });
            self.apply_draft();
        }
    }

    fn move_field(&mut self, shift: impl Fn(chrono::NaiveDate) -> chrono::NaiveDate) {
        let (Some(bounds), Some(mut draft)) = (self.bounds, self.draft) else {
            return;
        };
        match self.editing {
            RangeField::Start => draft.start = clamp_date(shift(draft.start), &bounds),
            RangeField::End => draft.end = clamp_date(shift(draft.end), &bounds),
        }
        self.draft = Some(draft);
        self.apply_draft();
    }

    /// Rebuild the report for the draft, or keep the old one if the draft is
    /// inverted.
    fn apply_draft(&mut self) {
        let Some(draft) = self.draft else {
            return;
        };
        match DateRange::new(draft.start, draft.end) {
            Ok(range) => {
                self.report = build_report(&self.table, range);
                self.status = None;
                debug!("Dashboard range set to {}", range);
            }
            Err(e) => {
                warn!("{}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let data = DashboardViewData {
            report: &self.report,
            draft: self.draft,
            editing: self.editing,
            status: self.status(),
        };
        dashboard_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

fn terminal_error(e: io::Error) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

// ── Terminal setup ────────────────────────────────────────────────────────────

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

fn enter_alternate_screen() -> io::Result<DashboardTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave raw mode and the alternate screen, attempting both steps even when
/// the first fails.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen);
    raw.and(screen)
}

/// Run `setup` once raw mode is on; if it fails, call `restore` before
/// returning the error so the shell is not left in raw mode.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> Result<T> {
    setup().map_err(|e| {
        restore();
        terminal_error(e)
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::RentalRecord;
    use ratatui::backend::TestBackend;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_table() -> RentalTable {
        let rows = [
            (d(2011, 1, 1), 10),
            (d(2011, 1, 31), 20),
            (d(2011, 2, 15), 30),
            (d(2011, 3, 31), 40),
        ];
        RentalTable::new(
            rows.iter()
                .map(|&(date, cnt)| RentalRecord {
                    date,
                    hour: Some(8),
                    workingday: 1,
                    casual: 0,
                    registered: cnt,
                    cnt,
                })
                .collect(),
            true,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_starts_on_full_range() {
        let app = App::new("dark", make_table(), None);
        assert_eq!(
            app.draft(),
            Some(DraftRange {
                start: d(2011, 1, 1),
                end: d(2011, 3, 31)
            })
        );
        assert_eq!(app.editing(), RangeField::Start);
        assert_eq!(app.report().totals.total_cnt, 100);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_app_starts_on_initial_range() {
        let initial = DateRange::new(d(2011, 1, 1), d(2011, 1, 31)).unwrap();
        let app = App::new("light", make_table(), Some(initial));
        assert_eq!(app.report().totals.total_cnt, 30);
        assert_eq!(app.report().range, Some(initial));
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key(KeyCode::Char('q')),
            key(KeyCode::Char('Q')),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new("dark", make_table(), None);
            app.handle_key(event);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = App::new("dark", make_table(), None);
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_switches_field() {
        let mut app = App::new("dark", make_table(), None);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.editing(), RangeField::End);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.editing(), RangeField::Start);
    }

    #[test]
    fn test_day_steps_rebuild_report() {
        let mut app = App::new("dark", make_table(), None);
        app.handle_key(key(KeyCode::Right));

        assert_eq!(app.draft().unwrap().start, d(2011, 1, 2));
        assert_eq!(app.report().totals.total_cnt, 90);
        assert_eq!(app.report().rows, 3);
    }

    #[test]
    fn test_month_steps_on_end_field() {
        let mut app = App::new("dark", make_table(), None);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Down));

        assert_eq!(app.draft().unwrap().end, d(2011, 2, 28));
        assert_eq!(app.report().totals.total_cnt, 60);
    }

    #[test]
    fn test_edits_clamped_to_bounds() {
        let mut app = App::new("dark", make_table(), None);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.draft().unwrap().start, d(2011, 1, 1));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.draft().unwrap().end, d(2011, 3, 31));
    }

    #[test]
    fn test_inverted_range_keeps_previous_report() {
        let initial = DateRange::new(d(2011, 2, 15), d(2011, 3, 1)).unwrap();
        let mut app = App::new("dark", make_table(), Some(initial));
        let before = app.report().clone();

        // Start moves past the end.
        app.handle_key(key(KeyCode::Up));

        assert_eq!(app.draft().unwrap().start, d(2011, 3, 15));
        assert_eq!(app.report(), &before);
        assert!(app.status().unwrap().contains("Invalid date range"));

        // Moving back into a valid range clears the status.
        app.handle_key(key(KeyCode::Down));
        assert!(app.status().is_none());
        assert_eq!(app.report().range, Some(initial));
    }

    #[test]
    fn test_reset_restores_full_range() {
        let initial = DateRange::new(d(2011, 2, 1), d(2011, 2, 28)).unwrap();
        let mut app = App::new("dark", make_table(), Some(initial));
        assert_eq!(app.report().totals.total_cnt, 30);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.report().totals.total_cnt, 100);
        assert_eq!(app.report().range, app.table.date_bounds());
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = App::new("dark", make_table(), None);
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_empty_table_ignores_edits() {
        let mut app = App::new("dark", RentalTable::default(), None);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.draft().is_none());
        assert_eq!(app.report().rows, 0);
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<()> = setup_or_restore(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || restored = true,
        );

        assert!(restored);
        match result {
            Err(DashboardError::Terminal(msg)) => assert!(msg.contains("no tty")),
            other => panic!("expected Terminal error, got {other:?}"),
        }
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let mut restored = false;
        let value = setup_or_restore(|| Ok(7), || restored = true).unwrap();

        assert_eq!(value, 7);
        assert!(!restored);
    }

    #[test]
    fn test_render_does_not_panic() {
        let app = App::new("classic", make_table(), None);
        let mut terminal = Terminal::new(TestBackend::new(100, 36)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
