use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures at the edges of the game: config and persisted score files.
/// The simulation itself never produces one of these.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("corrupt record in {}: {:?}", path.display(), line)]
    CorruptRecord { path: PathBuf, line: String },
}

impl GameError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GameError::Io {
            path: path.into(),
            source,
        }
    }
}
