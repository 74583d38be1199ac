use crate::config::{parse_color, InvalidColor};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings chosen by the player that persist between sessions
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Preferences {
    /// Name or hex code of the board's background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<String>,
}

impl Preferences {
    /// Return the default preferences file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("preferences.json"))
    }

    /// Read preferences from the file at `path`.  Returns `None` if the file
    /// does not exist.
    pub(crate) fn load(path: &Path) -> Result<Option<Preferences>, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src)
            .map(Some)
            .map_err(LoadError::deserialize)
    }

    /// Write the preferences to `path`, creating parent directories as
    /// needed
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Return the stored background color, if any
    pub(crate) fn background_color(&self) -> Result<Option<Color>, InvalidColor> {
        self.background.as_deref().map(parse_color).transpose()
    }

    pub(crate) fn set_background_color(&mut self, color: Color) {
        self.background = Some(color.to_string());
    }
}

#[derive(Debug, Error)]
#[error("Failed to save preferences to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    pub(crate) fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize preferences")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write preferences to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read preferences from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read preferences file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize preferences")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("preferences.json");
        assert!(Preferences::load(&path).unwrap().is_none());
    }

    #[test]
    fn load_corrupt() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("preferences.json");
        fs_err::write(&path, "{\"background\": ").unwrap();
        let e = Preferences::load(&path).unwrap_err();
        assert_eq!(e.to_string(), "Failed to read preferences from disk");
        assert_eq!(
            e.source().map(ToString::to_string).as_deref(),
            Some("failed to deserialize preferences")
        );
    }

    #[test]
    fn save_and_load() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("a").join("b").join("preferences.json");
        let mut prefs = Preferences::default();
        prefs.set_background_color(Color::Magenta);
        prefs.save(&path).unwrap();
        let loaded = Preferences::load(&path).unwrap().unwrap();
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.background_color(), Ok(Some(Color::Magenta)));
    }

    #[test]
    fn empty_object() {
        let prefs = serde_json::from_str::<Preferences>("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.background_color(), Ok(None));
        assert_eq!(serde_json::to_string(&prefs).unwrap(), "{}");
    }

    #[test]
    fn bad_color() {
        let prefs = Preferences {
            background: Some(String::from("plaid")),
        };
        assert_eq!(
            prefs.background_color(),
            Err(InvalidColor(String::from("plaid")))
        );
    }
}
