use std::path::Path;

use crate::ai::AgentKind;
use crate::error::{ConfigError, EngineError};
use crate::game::Player;

/// Board shape, win condition and starting player.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub match_length: usize,
    pub first_player: Player,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rows: 6,
            cols: 7,
            match_length: 4,
            first_player: Player::One,
        }
    }
}

impl EngineConfig {
    /// Reject shapes no game can be played on.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 {
            return Err(EngineError::InvalidConfiguration("rows must be > 0".into()));
        }
        if self.cols == 0 {
            return Err(EngineError::InvalidConfiguration("cols must be > 0".into()));
        }
        if self.match_length == 0 {
            return Err(EngineError::InvalidConfiguration(
                "match_length must be > 0".into(),
            ));
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(EngineError::InvalidConfiguration(format!(
                "board of {}x{} cells is too large",
                self.rows, self.cols
            )));
        }
        if self.match_length > self.rows.max(self.cols) {
            return Err(EngineError::InvalidConfiguration(format!(
                "match_length {} exceeds both board dimensions ({}x{})",
                self.match_length, self.rows, self.cols
            )));
        }
        Ok(())
    }
}

/// Settings for the bundled game driver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub player1: AgentKind,
    pub player2: AgentKind,
    pub games: usize,
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            player1: AgentKind::Human,
            player2: AgentKind::Random,
            games: 1,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: EngineConfig,
    pub play: PlayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        if self.play.games == 0 {
            return Err(ConfigError::Validation("play.games must be > 0".into()));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board.rows, 6);
        assert_eq!(config.board.cols, 7);
        assert_eq!(config.board.match_length, 4);
        assert_eq!(config.board.first_player, Player::One);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
rows = 5
first_player = 2
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.rows, 5);
        assert_eq!(config.board.first_player, Player::Two);
        // Other fields should be defaults
        assert_eq!(config.board.cols, 7);
        assert_eq!(config.play, PlayConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_player_id_rejected() {
        let toml_str = "[board]\nfirst_player = 3\n";
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_dimensions() {
        let mut config = AppConfig::default();
        config.board.rows = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Engine(_))));

        let mut config = AppConfig::default();
        config.board.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_match_length() {
        let mut config = AppConfig::default();
        config.board.match_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_match_length_bound() {
        let mut config = AppConfig::default();
        config.board.match_length = 7;
        config.validate().expect("match_length equal to cols is allowed");

        config.board.match_length = 8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_overflowing_board() {
        let mut config = AppConfig::default();
        config.board.rows = usize::MAX / 2;
        config.board.cols = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Engine(EngineError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.play.games = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
rows = 5
cols = 5
match_length = 3

[play]
player1 = "random"
games = 100
seed = 7
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.board.match_length, 3);
        assert_eq!(config.play.player1, AgentKind::Random);
        assert_eq!(config.play.games, 100);
        assert_eq!(config.play.seed, Some(7));
        // Others are defaults
        assert_eq!(config.play.player2, AgentKind::Random);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nmatch_length = 9\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Engine(EngineError::InvalidConfiguration(_)))
        ));

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
