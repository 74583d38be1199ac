use crate::consts;
use crate::geometry::{Geometry, GeometryError};
use crate::prefs::{LoadError, Preferences, SaveError};
use ratatui::style::Color;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Initial board layout & game speed
    #[serde(default)]
    pub(crate) board: BoardConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which preferences should be stored: the file
    /// given in the configuration or, if that is not set, the default
    /// preferences file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn preferences_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .preferences_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| Preferences::default_path().map(Cow::from))
    }

    /// Load preferences from a file.  If the file does not exist, default
    /// preferences are returned.
    ///
    /// If `self.files.save_preferences` is `false`, default preferences are
    /// returned without reading anything from disk.
    pub(crate) fn load_preferences(&self) -> Result<Preferences, LoadError> {
        if !self.files.save_preferences {
            return Ok(Preferences::default());
        }
        let Some(p) = self.preferences_file() else {
            return Err(LoadError::no_path());
        };
        Ok(Preferences::load(&p)?.unwrap_or_default())
    }

    /// Save the given preferences to a file.
    ///
    /// If `self.files.save_preferences` is `false`, nothing is saved.
    pub(crate) fn save_preferences(&self, prefs: &Preferences) -> Result<(), SaveError> {
        if !self.files.save_preferences {
            return Ok(());
        }
        if let Some(p) = self.preferences_file() {
            prefs.save(&p)
        } else {
            Err(SaveError::no_path())
        }
    }
}

/// Board layout, limits, & speed.  Also used at runtime as the game's
/// current configuration, which changes when the player resizes the board or
/// picks a new color.
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawBoardConfig")]
pub(crate) struct BoardConfig {
    pub(crate) geometry: Geometry,

    /// Smallest number of cells per side the player may choose
    pub(crate) min_cells: u16,

    /// Largest number of cells per side the player may choose
    pub(crate) max_cells: u16,

    /// Time between movements of the snake
    pub(crate) tick_period: Duration,

    /// Fill color for the board's cells
    pub(crate) background: Color,
}

impl BoardConfig {
    /// Parse & validate a board size entered by the player
    pub(crate) fn parse_cells(&self, input: &str) -> Result<u16, BoardSizeError> {
        let input = input.trim();
        let value = input
            .parse::<u64>()
            .map_err(|_| BoardSizeError::NotANumber(input.to_owned()))?;
        u16::try_from(value)
            .ok()
            .filter(|c| (self.min_cells..=self.max_cells).contains(c))
            .ok_or(BoardSizeError::OutOfRange {
                value,
                min: self.min_cells,
                max: self.max_cells,
            })
    }
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            geometry: Geometry::default(),
            min_cells: consts::MIN_CELLS,
            max_cells: consts::MAX_CELLS,
            tick_period: consts::TICK_PERIOD,
            background: consts::BACKGROUND_COLOR,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawBoardConfig {
    cells: Option<u16>,
    min_cells: u16,
    max_cells: u16,
    cell_size: u16,
    border_width: u16,
    tick_ms: u64,
    background: Option<String>,
}

impl Default for RawBoardConfig {
    fn default() -> RawBoardConfig {
        RawBoardConfig {
            cells: None,
            min_cells: consts::MIN_CELLS,
            max_cells: consts::MAX_CELLS,
            cell_size: consts::CELL_SIZE,
            border_width: consts::BORDER_WIDTH,
            tick_ms: consts::TICK_MILLIS,
            background: None,
        }
    }
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = BoardConfigError;

    fn try_from(value: RawBoardConfig) -> Result<BoardConfig, BoardConfigError> {
        if value.min_cells == 0 || value.min_cells > value.max_cells {
            return Err(BoardConfigError::Limits {
                min: value.min_cells,
                max: value.max_cells,
            });
        }
        // An unset size follows the limits; an explicit one must lie within them
        let cells = match value.cells {
            Some(cells) if !(value.min_cells..=value.max_cells).contains(&cells) => {
                return Err(BoardConfigError::CellsOutOfRange {
                    cells,
                    min: value.min_cells,
                    max: value.max_cells,
                });
            }
            Some(cells) => cells,
            None => consts::DEFAULT_CELLS.clamp(value.min_cells, value.max_cells),
        };
        // Make sure the player can't resize the board out of pixel space
        Geometry::new(value.max_cells, value.cell_size, value.border_width)?;
        let geometry = Geometry::new(cells, value.cell_size, value.border_width)?;
        if value.tick_ms == 0 {
            return Err(BoardConfigError::ZeroTick);
        }
        let background = match value.background {
            Some(s) => parse_color(&s)?,
            None => consts::BACKGROUND_COLOR,
        };
        Ok(BoardConfig {
            geometry,
            min_cells: value.min_cells,
            max_cells: value.max_cells,
            tick_period: Duration::from_millis(value.tick_ms),
            background,
        })
    }
}

/// Parse a color name (as understood by ratatui) or `#RRGGBB` hex code
pub(crate) fn parse_color(s: &str) -> Result<Color, InvalidColor> {
    Color::from_str(s).map_err(|_| InvalidColor(s.to_owned()))
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which preferences should be stored
    pub(crate) preferences_file: Option<PathBuf>,

    /// Whether to load & save preferences in a file
    pub(crate) save_preferences: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            preferences_file: None,
            save_preferences: true,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoardConfigError {
    #[error("invalid board size limits: min-cells = {min}, max-cells = {max}")]
    Limits { min: u16, max: u16 },
    #[error("cells = {cells} is outside of the range {min} to {max}")]
    CellsOutOfRange { cells: u16, min: u16, max: u16 },
    #[error("invalid board geometry")]
    Geometry(#[from] GeometryError),
    #[error("tick-ms must be nonzero")]
    ZeroTick,
    #[error(transparent)]
    Color(#[from] InvalidColor),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid color: {0:?}")]
pub(crate) struct InvalidColor(pub(crate) String);

/// Error for a rejected board size entered by the player
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoardSizeError {
    #[error("Board size must be a whole number; got {0:?}")]
    NotANumber(String),
    #[error("Board size must be between {min} and {max}; got {value}")]
    OutOfRange { value: u64, min: u16, max: u16 },
    #[error("Board size is not usable")]
    Geometry(#[from] GeometryError),
}
