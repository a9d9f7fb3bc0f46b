use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background values 0-6 count as dark and 7-15 as light. Anything else
/// reports [`BackgroundType::Unknown`].
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    let bg = value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(0..=6) => BackgroundType::Dark,
        Some(7..=15) => BackgroundType::Light,
        _ => BackgroundType::Unknown,
    }
}

/// Strong blue used for the monthly trend and the registered series.
const TREND_BLUE: Color = Color::Rgb(0x2E, 0x86, 0xC1);
/// Pale blue used for the casual series.
const CASUAL_BLUE: Color = Color::Rgb(0xAE, 0xD6, 0xF1);

/// Every style the dashboard components draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub subtitle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub dim: Style,
    pub label: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Range bar ────────────────────────────────────────────────────────────
    /// Date field currently being edited.
    pub range_active: Style,
    pub range_inactive: Style,

    // ── Metric cards ─────────────────────────────────────────────────────────
    pub metric_border: Style,
    pub metric_title: Style,
    pub metric_value: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_total: Style,
    pub chart_casual: Style,
    pub chart_registered: Style,
    pub chart_axis: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Gray),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            range_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            range_inactive: Style::default().fg(Color::White),

            metric_border: Style::default().fg(Color::DarkGray),
            metric_title: Style::default().fg(Color::Gray),
            metric_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            chart_total: Style::default().fg(TREND_BLUE),
            chart_casual: Style::default().fg(CASUAL_BLUE),
            chart_registered: Style::default().fg(TREND_BLUE),
            chart_axis: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text on the light canvas. The pale casual blue is swapped for
    /// cyan so it stays visible.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::DarkGray),
            separator: Style::default().fg(Color::Gray),

            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            range_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            range_inactive: Style::default().fg(Color::Black),

            metric_border: Style::default().fg(Color::Gray),
            metric_title: Style::default().fg(Color::DarkGray),
            metric_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            chart_total: Style::default().fg(TREND_BLUE),
            chart_casual: Style::default().fg(Color::Cyan),
            chart_registered: Style::default().fg(TREND_BLUE),
            chart_axis: Style::default().fg(Color::DarkGray),
        }
    }

    /// Classic theme restricted to the basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            subtitle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            range_active: Style::default().fg(Color::Black).bg(Color::White),
            range_inactive: Style::default().fg(Color::White),

            metric_border: Style::default().fg(Color::DarkGray),
            metric_title: Style::default().fg(Color::Gray),
            metric_value: Style::default().fg(Color::White),

            chart_total: Style::default().fg(Color::Blue),
            chart_casual: Style::default().fg(Color::Cyan),
            chart_registered: Style::default().fg(Color::Blue),
            chart_axis: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. `"auto"` and unknown names detect.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
