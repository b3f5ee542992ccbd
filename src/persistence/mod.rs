//! Best-score persistence
//!
//! Features:
//! - File-backed JSON record, created on first use
//! - Corruption detection (falls back to zero)
//! - Best-effort writes: failures are logged, never fatal
//! - Atomic replace: the record is written to a sibling temp file, then renamed
//!   over the old one, so a crash mid-write never truncates it

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::highscores::HighScore;

/// Why a load or save failed
#[derive(Debug)]
pub enum PersistenceError {
    /// Filesystem failure (permissions, missing directory, ...)
    Io(io::Error),
    /// The record exists but is not a valid `{"highest": N}` document
    Parse(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "score store I/O error: {e}"),
            PersistenceError::Parse(e) => write!(f, "corrupt score record: {e}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Parse(e)
    }
}

/// Storage for a single best-score integer
///
/// Implementors provide the fallible `try_*` pair; the game only ever calls
/// the infallible wrappers so a broken store cannot stop the frame loop.
pub trait ScoreStore {
    fn try_load(&mut self) -> Result<HighScore, PersistenceError>;
    fn try_save(&mut self, record: HighScore) -> Result<(), PersistenceError>;

    /// Best score, or 0 when the store is unreadable
    fn load_highest(&mut self) -> u64 {
        match self.try_load() {
            Ok(record) => record.highest,
            Err(e) => {
                log::warn!("{e}; treating best score as 0");
                0
            }
        }
    }

    /// Persist a new best score, logging on failure
    fn save_highest(&mut self, score: u64) {
        match self.try_save(HighScore::new(score)) {
            Ok(()) => log::info!("New best score {score} saved"),
            Err(e) => log::warn!("Failed to save best score {score}: {e}"),
        }
    }
}

/// JSON file store (`highscore.json` by default)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `highscore.json` -> `highscore.json.tmp`, in the same directory so the
    /// rename stays on one filesystem
    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for JsonFileStore {
    fn try_load(&mut self) -> Result<HighScore, PersistenceError> {
        if !self.path.exists() {
            log::info!("No score file at {}, creating one", self.path.display());
            self.try_save(HighScore::default())?;
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(HighScore::from_json(&json)?)
    }

    fn try_save(&mut self, record: HighScore) -> Result<(), PersistenceError> {
        let json = record.to_json()?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-memory store for tests and persistence-less runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<HighScore>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a best score
    pub fn with_highest(highest: u64) -> Self {
        Self {
            record: Some(HighScore::new(highest)),
            writes: 0,
        }
    }

    /// Overwrite the record as if another process edited it
    pub fn set_external(&mut self, highest: u64) {
        self.record = Some(HighScore::new(highest));
    }

    /// Number of saves performed through the trait
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn stored(&self) -> Option<u64> {
        self.record.map(|r| r.highest)
    }
}

impl ScoreStore for MemoryStore {
    fn try_load(&mut self) -> Result<HighScore, PersistenceError> {
        Ok(*self.record.get_or_insert_with(HighScore::default))
    }

    fn try_save(&mut self, record: HighScore) -> Result<(), PersistenceError> {
        self.record = Some(record);
        self.writes += 1;
        Ok(())
    }
}
