//! High score persistence
//!
//! A single scalar best score behind a get/set store. Writes are
//! fire-and-forget: a failed write is logged and otherwise ignored. Missing or
//! corrupt stored values read as 0.

/// Well-known storage key for the best score
pub const STORAGE_KEY: &str = "breakoutHighScore";

/// Get/set access to the persisted high score
pub trait ScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn get(&self) -> u64;
    /// Persist a new best score. Never fails from the caller's point of view.
    fn set(&mut self, score: u64);
}

/// In-process store (tests, and hosts without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    score: u64,
    writes: usize,
}

impl MemoryScoreStore {
    pub fn new(score: u64) -> Self {
        Self { score, writes: 0 }
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> u64 {
        self.score
    }

    fn set(&mut self, score: u64) {
        self.score = score;
        self.writes += 1;
    }
}

/// On-disk record
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
struct StoredScore {
    high_score: u64,
}

/// JSON file store for native builds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileScoreStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileScoreStore {
    fn get(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match serde_json::from_str::<StoredScore>(&json) {
            Ok(stored) => {
                log::info!("Loaded high score {}", stored.high_score);
                stored.high_score
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn set(&mut self, score: u64) {
        let stored = StoredScore { high_score: score };
        match serde_json::to_string(&stored) {
            Ok(json) => match std::fs::write(&self.path, json) {
                Ok(()) => log::info!("High score {} saved", score),
                Err(e) => log::warn!("Could not save high score to {}: {}", self.path.display(), e),
            },
            Err(e) => log::warn!("Could not encode high score: {}", e),
        }
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageScoreStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageScoreStore {
    fn get(&self) -> u64 {
        Self::storage()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
            .map(|value| parse_stored_score(&value))
            .unwrap_or(0)
    }

    fn set(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(STORAGE_KEY, &score.to_string()).is_err() {
                log::warn!("High score not saved (storage unavailable)");
            }
        }
    }
}

/// Parse a stored score string; anything that is not a non-negative integer
/// reads as 0
pub fn parse_stored_score(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}
