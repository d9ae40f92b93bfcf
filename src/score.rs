use crate::constants::*;
use crate::error::GameError;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const HIGHSCORE_KEY: &str = "highscore";

/// Persistent integer storage for the Score Tracker.
pub trait KeyValueStore {
    fn load_u32(&self, key: &str) -> Result<Option<u32>, GameError>;
    fn save_u32(&mut self, key: &str, value: u32) -> Result<(), GameError>;
}

/// One plain-text file per key, `<dir>/<key>.dat`, holding a single integer.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FlatFileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.dat"))
    }
}

impl KeyValueStore for FlatFileStore {
    fn load_u32(&self, key: &str) -> Result<Option<u32>, GameError> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GameError::io(path, e)),
        };
        let trimmed = text.trim();
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| GameError::CorruptRecord {
                path,
                line: trimmed.to_string(),
            })
    }

    fn save_u32(&mut self, key: &str, value: u32) -> Result<(), GameError> {
        let path = self.path_for(key);
        fs::write(&path, value.to_string()).map_err(|e| GameError::io(path, e))
    }
}

/// Keeps values for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl KeyValueStore for MemoryStore {
    fn load_u32(&self, key: &str) -> Result<Option<u32>, GameError> {
        Ok(self.values.get(key).copied())
    }

    fn save_u32(&mut self, key: &str, value: u32) -> Result<(), GameError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    current: u32,
    high: u32,
    level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Score {
            current: 0,
            high: 0,
            level: 1,
        }
    }
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the stored high score; a missing or unreadable value counts as 0.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mut score = Score::new();
        score.load_high_score(store);
        score
    }

    pub fn add_points(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
        self.high = self.high.max(self.current);
        self.level = 1 + self.current / POINTS_PER_LEVEL;
    }

    /// New game. The high score survives.
    pub fn reset(&mut self) {
        self.current = 0;
        self.level = 1;
    }

    /// Asteroid speed factor for the current score, capped.
    pub fn difficulty_multiplier(&self) -> f64 {
        (1.0 + self.current as f64 / POINTS_PER_DIFFICULTY_STEP).min(MAX_DIFFICULTY_MULTIPLIER)
    }

    pub fn load_high_score(&mut self, store: &impl KeyValueStore) {
        match store.load_u32(HIGHSCORE_KEY) {
            Ok(Some(value)) => {
                self.high = self.high.max(value);
                debug!("Loaded high score {}", value);
            }
            Ok(None) => debug!("No stored high score"),
            Err(e) => warn!("Could not load high score, using 0: {e}"),
        }
    }

    pub fn save_high_score(&self, store: &mut impl KeyValueStore) -> Result<(), GameError> {
        store.save_u32(HIGHSCORE_KEY, self.high)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}
