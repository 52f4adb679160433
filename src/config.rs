use crate::error::{GitfetchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub const CONFIG_ENV: &str = "GITFETCH_CONFIG";

/// Settings read from `config.toml`. Every section is optional.
///
/// Older gitfetch releases wrote the same sections, so their files still
/// load; a `github_token` from those is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub author: Option<String>,
    pub include_merges: bool,
    #[serde(skip_serializing)]
    pub github_token: Option<String>,
    pub graph_data: GraphData,
    pub graph_colors: GraphColors,
    pub text_colors: TextColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphData {
    /// Percentiles of non-zero daily counts used as shade boundaries.
    pub percentiles: [usize; 4],
}

impl Default for GraphData {
    fn default() -> Self {
        Self {
            percentiles: [0, 30, 60, 90],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphColors {
    pub level1: Color,
    pub level2: Color,
    pub level3: Color,
    pub level4: Color,
}

impl Default for GraphColors {
    fn default() -> Self {
        Self {
            level1: Color::from_rgb(13, 68, 41),
            level2: Color::from_rgb(1, 108, 49),
            level3: Color::from_rgb(38, 166, 65),
            level4: Color::from_rgb(57, 211, 83),
        }
    }
}

impl GraphColors {
    pub fn levels(&self) -> [u8; 4] {
        [
            self.level1.index(),
            self.level2.index(),
            self.level3.index(),
            self.level4.index(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextColors {
    pub info_color: Color,
}

impl Default for TextColors {
    fn default() -> Self {
        Self {
            info_color: Color::from_rgb(0, 255, 255),
        }
    }
}

/// A terminal colour, written either as an `"r,g,b"` string or as an
/// xterm-256 index. RGB values are mapped onto the 6x6x6 colour cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec", into = "ColorSpec")]
pub struct Color(u8);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Index(u8),
    Rgb(String),
}

/// Channel intensities of the xterm-256 colour cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl Color {
    /// Nearest colour in the xterm-256 cube (indices 16 to 231).
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let nearest = |c: u8| {
            CUBE_LEVELS
                .iter()
                .enumerate()
                .min_by_key(|&(_, level)| level.abs_diff(c))
                .map_or(0, |(i, _)| i as u8)
        };
        Self(16 + 36 * nearest(r) + 6 * nearest(g) + nearest(b))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let channels: Vec<&str> = s.split(',').map(str::trim).collect();
        match channels.as_slice() {
            [r, g, b] => {
                let channel = |c: &str| {
                    c.parse::<u8>()
                        .map_err(|_| format!("invalid colour channel {c:?} in {s:?}"))
                };
                Ok(Self::from_rgb(channel(r)?, channel(g)?, channel(b)?))
            }
            _ => Err(format!("expected a colour as \"r,g,b\", got {s:?}")),
        }
    }
}

impl TryFrom<ColorSpec> for Color {
    type Error = String;

    fn try_from(spec: ColorSpec) -> std::result::Result<Self, Self::Error> {
        match spec {
            ColorSpec::Index(index) => Ok(Self(index)),
            ColorSpec::Rgb(rgb) => rgb.parse(),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Index(color.0)
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| GitfetchError::Config(e.message().to_string()))?;
        config.validate()?;
        if config.github_token.is_some() {
            warn!("Ignoring github_token in configuration: history is read from the local repository");
        }
        Ok(config)
    }

    /// Loads `explicit` if given (it must exist), otherwise the default
    /// location, falling back to built-in defaults when no file is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::read(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            GitfetchError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            GitfetchError::Config(msg) => {
                GitfetchError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        let p = &self.graph_data.percentiles;
        if p.iter().any(|&v| v > 100) {
            return Err(GitfetchError::Config(format!(
                "graph_data.percentiles must be between 0 and 100, got {p:?}"
            )));
        }
        if p.windows(2).any(|w| w[0] > w[1]) {
            return Err(GitfetchError::Config(format!(
                "graph_data.percentiles must be non-decreasing, got {p:?}"
            )));
        }
        Ok(())
    }
}

/// `$HOME/.config/gitfetch/config.toml`
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("gitfetch")
            .join("config.toml")
    })
}
