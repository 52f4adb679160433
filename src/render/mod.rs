//! Terminal and machine-readable rendering of a [`ContributionReport`].
//!
//! Rendering is a pure function of the report and [`RenderOptions`]; colour
//! is decided by the caller rather than probed from the terminal here.
//!
//! [`ContributionReport`]: crate::model::ContributionReport

pub mod calendar;
pub mod levels;
pub mod output;
pub mod summary;

pub use calendar::render_calendar;
pub use levels::ShadeLevels;
pub use output::{to_json, to_ndjson};
pub use summary::render_summary;

use crate::config::Config;
use crate::model::ContributionReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// xterm-256 colours for shade levels 1 to 4
    pub levels: [u8; 4],
    pub info: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Palette {
    pub fn from_config(config: &Config) -> Self {
        Self {
            levels: config.graph_colors.levels(),
            info: config.text_colors.info_color.index(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub palette: Palette,
    pub percentiles: [usize; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), false)
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config, color: bool) -> Self {
        Self {
            color,
            palette: Palette::from_config(config),
            percentiles: config.graph_data.percentiles,
        }
    }
}

/// The `who@period` line above the totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub who: String,
    pub period: String,
}

pub fn render_report(report: &ContributionReport, heading: &Heading, opts: &RenderOptions) -> String {
    let mut out = render_calendar(report, opts);
    out.push('\n');
    out.push_str(&render_summary(report, heading, opts));
    out
}
