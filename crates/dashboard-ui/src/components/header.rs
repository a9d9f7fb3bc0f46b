use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Dashboard title.
pub const TITLE: &str = "Bike Sharing Dashboard";

/// One-line description shown under the title.
pub const DESCRIPTION: &str = "Bike rental analysis by time trend and user type.";

/// Width of the `=` rule under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering four lines:
///
/// 1. Title.
/// 2. A 60-column `=` separator.
/// 3. The description line.
/// 4. An empty line.
pub struct Header<'a> {
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(Span::styled(DESCRIPTION, self.theme.subtitle)),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
