use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Configuration for a game session.
///
/// Every field has a default, so a config file only needs to name the values
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Echo each submitted line back as a command output.
    pub echo_commands: bool,
    /// Maximum marker log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_marker_events: usize,
    /// Name given to the player entity.
    pub player_name: String,
    /// Health a new player starts with.
    pub starting_health: i64,
    /// Upper bound for player health.
    pub max_health: i64,
    /// Gold a new player starts with.
    pub starting_gold: i64,
    /// Upper bound for player gold.
    pub max_gold: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            echo_commands: true,
            max_marker_events: 1024,
            player_name: "player".to_string(),
            starting_health: 10,
            max_health: 100,
            starting_gold: 0,
            max_gold: 1_000_000,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Enable or disable command echo.
    pub fn with_echo_commands(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }

    /// Set the maximum marker log size (0 = unlimited).
    pub fn with_max_marker_events(mut self, max: usize) -> Self {
        self.max_marker_events = max;
        self
    }

    /// Set the player's name.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Set starting and maximum health.
    pub fn with_health(mut self, starting: i64, max: i64) -> Self {
        self.starting_health = starting;
        self.max_health = max;
        self
    }

    /// Set starting and maximum gold.
    pub fn with_gold(mut self, starting: i64, max: i64) -> Self {
        self.starting_gold = starting;
        self.max_gold = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_default_values() {
        let config = GameConfig::default();
        assert!(config.echo_commands);
        assert_eq!(config.max_marker_events, 1024);
        assert_eq!(config.starting_health, 10);
        assert_eq!(config.max_health, 100);
    }

    #[test]
    fn config_builder_chain() {
        let config = GameConfig::default()
            .with_echo_commands(false)
            .with_max_marker_events(0)
            .with_player_name("Frank")
            .with_health(50, 200)
            .with_gold(5, 10);
        assert!(!config.echo_commands);
        assert_eq!(config.max_marker_events, 0);
        assert_eq!(config.player_name, "Frank");
        assert_eq!((config.starting_health, config.max_health), (50, 200));
        assert_eq!((config.starting_gold, config.max_gold), (5, 10));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "echo_commands": false }"#).unwrap();
        assert!(!config.echo_commands);
        assert_eq!(config.max_health, 100);
        assert_eq!(config.player_name, "player");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(GameConfig::from_json_str("{ echo").is_err());
    }

    #[test]
    fn config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "starting_gold": 25 }}"#).unwrap();
        let config = GameConfig::from_path(file.path()).unwrap();
        assert_eq!(config.starting_gold, 25);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = GameConfig::from_path(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(crate::EngineError::Io(_))));
    }
}
