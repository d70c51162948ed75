//! Config - Race description loaded from JSON
//!
//! ```json
//! { "track": ["212", "101", "313"], "bots": [{ "name": "Bot1" }], "seed": 7 }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::race_engine::bot::Bot;
use crate::race_engine::error::{RaceError, Result};
use crate::race_engine::track::TrackGrid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    pub name: String,
}

/// Race configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Track rows, one digit per cell
    pub track: Vec<String>,
    /// Bots in start order
    pub bots: Vec<BotConfig>,
    /// Seed for the nearby-move random source; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Give up after this many ticks
    #[serde(default)]
    pub max_ticks: Option<u32>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            track: vec!["212".into(), "101".into(), "313".into()],
            bots: vec![
                BotConfig { name: "Bot1".into() },
                BotConfig { name: "Bot2".into() },
            ],
            seed: None,
            max_ticks: None,
        }
    }
}

impl RaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn build_track(&self) -> Result<TrackGrid> {
        TrackGrid::from_rows(self.track.as_slice())
    }

    /// Place each configured bot on its start cell, in order
    pub fn spawn_bots(&self, track: &TrackGrid) -> Result<Vec<Bot>> {
        let slots = track.start_positions();
        if self.bots.len() > slots.len() {
            return Err(RaceError::TooManyBots {
                bots: self.bots.len(),
                slots: slots.len(),
            });
        }

        Ok(self
            .bots
            .iter()
            .zip(slots)
            .map(|(bot, start)| Bot::new(bot.name.clone(), *start))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race_engine::position::Position;

    const CONFIG: &str = r#"
        {
            "track": ["212", "101", "313"],
            "bots": [{ "name": "Bot1" }, { "name": "Bot2" }]
        }
    "#;

    #[test]
    fn test_parse_config() {
        let config = RaceConfig::from_json_str(CONFIG).unwrap();
        assert_eq!(config.track, vec!["212", "101", "313"]);
        assert_eq!(config.bots.len(), 2);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_ticks, None);
    }

    #[test]
    fn test_spawn_bots_on_start_cells() {
        let config = RaceConfig::from_json_str(CONFIG).unwrap();
        let track = config.build_track().unwrap();
        let bots = config.spawn_bots(&track).unwrap();

        assert_eq!(bots[0].name(), "Bot1");
        assert_eq!(bots[0].current_position(), Position::new(0, 0));
        assert_eq!(bots[1].name(), "Bot2");
        assert_eq!(bots[1].current_position(), Position::new(0, 2));
    }

    #[test]
    fn test_too_many_bots() {
        let config = RaceConfig::from_json_str(
            r#"{ "track": ["211", "101", "313"], "bots": [{ "name": "Bot1" }, { "name": "Bot2" }] }"#,
        )
        .unwrap();
        let track = config.build_track().unwrap();

        let err = config.spawn_bots(&track).unwrap_err();
        assert!(matches!(err, RaceError::TooManyBots { bots: 2, slots: 1 }));
    }

    #[test]
    fn test_missing_keys_are_reported() {
        let err = RaceConfig::from_json_str("{}").unwrap_err();
        assert!(err.to_string().contains("track"));

        let err = RaceConfig::from_json_str(r#"{ "track": ["211", "101", "313"] }"#).unwrap_err();
        assert!(err.to_string().contains("bots"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RaceConfig::load("invalidPath.json").unwrap_err();
        assert!(matches!(err, RaceError::Io { .. }));
        assert!(err.to_string().contains("invalidPath.json"));
    }

    #[test]
    fn test_default_config_is_runnable() {
        let config = RaceConfig::default();
        let track = config.build_track().unwrap();
        assert_eq!(config.spawn_bots(&track).unwrap().len(), 2);
    }
}
