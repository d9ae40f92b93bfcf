use crate::constants::*;
use crate::error::GameError;
use crate::types::Arena;
use log::{LevelFilter, ParseLevelError, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub starting_lives: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObjectsConfig {
    pub max_asteroids: usize,
    pub max_projectiles: usize,
    pub max_powerups: usize,
    pub initial_wave: usize,
    pub edge_spawn_margin: f64,
    /// Seconds between free power-up drops; 0 disables them.
    pub powerup_spawn_interval: f64,
    pub powerup_spawn_edge_margin: f64,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            max_asteroids: MAX_ASTEROIDS,
            max_projectiles: MAX_PROJECTILES,
            max_powerups: MAX_POWERUPS,
            initial_wave: INITIAL_WAVE_SIZE,
            edge_spawn_margin: EDGE_SPAWN_MARGIN,
            powerup_spawn_interval: POWERUP_SPAWN_INTERVAL,
            powerup_spawn_edge_margin: POWERUP_SPAWN_EDGE_MARGIN,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub powerup_drop_chance: f64,
    pub asteroid_trickle_interval: f64,
    pub rapid_fire_shots: u32,
    pub fire_cooldown: f64,
    pub rapid_fire_cooldown: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            asteroid_trickle_interval: ASTEROID_TRICKLE_INTERVAL,
            rapid_fire_shots: RAPID_FIRE_SHOTS,
            fire_cooldown: FIRE_COOLDOWN,
            rapid_fire_cooldown: RAPID_FIRE_COOLDOWN,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the flat key-value files (`highscore.dat`).
    pub data_dir: PathBuf,
    pub highscore_table: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            highscore_table: PathBuf::from("highscores.dat"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("asteroid-arcade.log"),
            level: "info".into(),
        }
    }
}

impl LoggingConfig {
    /// Parse failures go back to the caller, which logs them once a
    /// logger exists.
    pub fn level_filter(&self) -> Result<LevelFilter, ParseLevelError> {
        self.level.parse()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub objects: ObjectsConfig,
    pub rules: RulesConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;
        toml::from_str(&data).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Missing or broken files fall back to defaults; the error comes back
    /// so the caller can log it once logging is up.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<GameError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// A non-positive or non-finite size is replaced by the default arena.
    pub fn arena(&self) -> Arena {
        let ArenaConfig { width, height } = self.arena;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            return Arena::new(width, height);
        }
        let fallback = ArenaConfig::default();
        warn!(
            "Arena {}x{} unusable, using {}x{}",
            width, height, fallback.width, fallback.height
        );
        Arena::new(fallback.width, fallback.height)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            w.push(format!(
                "arena must be positive, got {}x{}; the default arena is used",
                self.arena.width, self.arena.height
            ));
        }
        if self.objects.max_asteroids == 0 {
            w.push("objects.max_asteroids is 0: no asteroid can ever spawn".into());
        }
        if self.objects.max_projectiles == 0 {
            w.push("objects.max_projectiles is 0: the ship cannot fire".into());
        }
        if self.objects.max_powerups == 0 {
            w.push("objects.max_powerups is 0: power-ups are disabled".into());
        }
        if !(0.0..=1.0).contains(&self.rules.powerup_drop_chance) {
            w.push(format!(
                "rules.powerup_drop_chance {} outside [0, 1]",
                self.rules.powerup_drop_chance
            ));
        }
        if self.player.starting_lives == 0 {
            w.push("player.starting_lives is 0: the game ends immediately".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.arena.width, 1200.0);
        assert_eq!(cfg.player.starting_lives, 3);
        assert_eq!(cfg.objects.max_asteroids, 20);
        assert_eq!(cfg.rules.powerup_drop_chance, 0.2);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let sample = r#"
[arena]
width = 800.0

[rules]
powerup_drop_chance = 0.3

[logging]
level = "debug"
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GameConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.arena.width, 800.0);
        assert_eq!(cfg.arena.height, SCREEN_HEIGHT);
        assert_eq!(cfg.rules.powerup_drop_chance, 0.3);
        assert_eq!(cfg.rules.rapid_fire_shots, RAPID_FIRE_SHOTS);
        assert_eq!(cfg.logging.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, err) = GameConfig::load_or_default(dir.path().join("nope.toml"));
        assert_eq!(cfg, GameConfig::default());
        assert!(matches!(err, Some(GameError::Io { .. })));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[arena\nwidth = ").unwrap();
        let (cfg, err) = GameConfig::load_or_default(file.path());
        assert_eq!(cfg, GameConfig::default());
        assert!(matches!(err, Some(GameError::ConfigParse { .. })));
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = GameConfig::default();
        cfg.rules.powerup_drop_chance = 1.5;
        cfg.objects.max_projectiles = 0;
        cfg.arena.height = 0.0;
        assert_eq!(cfg.validate().len(), 3);
    }

    #[test]
    fn unusable_arena_falls_back_to_default() {
        let mut cfg = GameConfig::default();
        cfg.arena.width = 0.0;
        assert_eq!(cfg.arena(), Arena::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        cfg.arena.width = 640.0;
        cfg.arena.height = f64::NAN;
        assert_eq!(cfg.arena(), Arena::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        cfg.arena.height = 480.0;
        assert_eq!(cfg.arena(), Arena::new(640.0, 480.0));
    }

    #[test]
    fn unknown_log_level_is_an_error() {
        let logging = LoggingConfig {
            level: "chatty".into(),
            ..LoggingConfig::default()
        };
        assert!(logging.level_filter().is_err());
        assert_eq!(LoggingConfig::default().level_filter().unwrap(), LevelFilter::Info);
    }
}
