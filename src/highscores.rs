use crate::constants::MAX_HIGHSCORES;
use crate::error::GameError;
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighscoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        HighscoreEntry {
            name: name.into(),
            score,
        }
    }
}

const DEFAULT_TABLE: [(&str, u32); MAX_HIGHSCORES] = [
    ("ADMIN", 10000),
    ("PILOT", 8500),
    ("JUU__", 7000),
    ("NOVA_", 5500),
    ("STAR_", 4000),
    ("COMET", 3000),
    ("ORBIT", 2000),
    ("MOON_", 1500),
    ("SOLAR", 1000),
    ("ASTRO", 500),
];

/// Top scores, best first. Equal scores keep the order they were added in.
#[derive(Debug, Clone)]
pub struct HighscoreTable {
    entries: Vec<HighscoreEntry>,
    path: Option<PathBuf>,
}

impl Default for HighscoreTable {
    fn default() -> Self {
        let mut table = HighscoreTable {
            entries: Vec::new(),
            path: None,
        };
        table.fill_defaults();
        table
    }
}

impl HighscoreTable {
    /// Table kept in memory only.
    pub fn in_memory(entries: Vec<HighscoreEntry>) -> Self {
        let mut table = HighscoreTable { entries, path: None };
        table.sort_and_trim();
        table
    }

    /// Reads `NAME SCORE` lines. A missing or empty file yields the default
    /// table; malformed lines are skipped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut table = HighscoreTable {
            entries: Vec::new(),
            path: Some(path.clone()),
        };
        match read_entries(&path) {
            Ok(entries) => table.entries = entries,
            Err(e) => warn!("Could not read highscores: {e}"),
        }
        if table.entries.is_empty() {
            debug!("Using default highscore table");
            table.fill_defaults();
        }
        table.sort_and_trim();
        table
    }

    pub fn save(&self) -> Result<(), GameError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let body: String = self
            .entries
            .iter()
            .map(|e| format!("{} {}\n", e.name, e.score))
            .collect();
        fs::write(path, body).map_err(|e| GameError::io(path, e))
    }

    pub fn is_new_highscore(&self, score: u32) -> bool {
        self.entries.len() < MAX_HIGHSCORES || score > self.lowest()
    }

    /// Zero-based rank `score` would take.
    pub fn position_for(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
    }

    pub fn lowest(&self) -> u32 {
        self.entries.last().map_or(0, |e| e.score)
    }

    /// Inserts, trims to the table size and writes the file back.
    pub fn add(&mut self, name: impl Into<String>, score: u32) -> Result<(), GameError> {
        self.entries.push(HighscoreEntry::new(name, score));
        self.sort_and_trim();
        self.save()
    }

    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    fn fill_defaults(&mut self) {
        self.entries = DEFAULT_TABLE
            .iter()
            .map(|&(name, score)| HighscoreEntry::new(name, score))
            .collect();
    }

    fn sort_and_trim(&mut self) {
        // stable: ties keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGHSCORES);
    }
}

fn read_entries(path: &Path) -> Result<Vec<HighscoreEntry>, GameError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(GameError::io(path, e)),
    };
    let mut entries = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => warn!(
                "{}",
                GameError::CorruptRecord {
                    path: path.to_path_buf(),
                    line: line.to_string(),
                }
            ),
        }
        if entries.len() == MAX_HIGHSCORES {
            break;
        }
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Option<HighscoreEntry> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let score = parts.next()?.parse().ok()?;
    Some(HighscoreEntry::new(name, score))
}
