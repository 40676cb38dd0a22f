use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{ScoreError, ScoreResult};

/// Running score plus the best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    high_score: u32,
}

impl ScoreKeeper {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Clears the running score; the high score is kept
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

/// Where the high score lives between sessions
pub trait HighScoreStore {
    fn load(&self) -> ScoreResult<u32>;
    fn save(&self, value: u32) -> ScoreResult<()>;
}

/// Plain decimal text in a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> ScoreResult<u32> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(ScoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let first_line = content.lines().next().unwrap_or("").trim();
        first_line.parse().map_err(|_| ScoreError::Malformed {
            path: self.path.clone(),
            content: first_line.to_string(),
        })
    }

    fn save(&self, value: u32) -> ScoreResult<()> {
        fs::write(&self.path, value.to_string()).map_err(|source| ScoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Keeps the value in memory; clones share it
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Arc<AtomicU32>,
}

impl MemoryHighScoreStore {
    pub fn new(value: u32) -> Self {
        Self {
            value: Arc::new(AtomicU32::new(value)),
        }
    }

    pub fn get(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> ScoreResult<u32> {
        Ok(self.get())
    }

    fn save(&self, value: u32) -> ScoreResult<()> {
        self.value.store(value, Ordering::Relaxed);
        Ok(())
    }
}

/// Loads the stored high score, falling back to 0 on any failure
pub fn load_high_score(store: &dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(value) => value,
        Err(err) => {
            log::warn!("could not load high score: {err}");
            0
        }
    }
}

/// Saves the high score; failures are logged and otherwise ignored
pub fn persist_high_score(store: &dyn HighScoreStore, value: u32) {
    match store.save(value) {
        Ok(()) => log::debug!("high score {value} saved"),
        Err(err) => log::warn!("could not save high score: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "galactic_defender_{}_{}_{}.txt",
            name,
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_high_score_follows_score() {
        let mut keeper = ScoreKeeper::new(250);
        keeper.add(100);
        assert_eq!(keeper.high_score(), 250);
        keeper.add(200);
        assert_eq!(keeper.score(), 300);
        assert_eq!(keeper.high_score(), 300);

        keeper.reset();
        assert_eq!(keeper.score(), 0);
        assert_eq!(keeper.high_score(), 300);
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("round_trip");
        let store = FileHighScoreStore::new(&path);
        store.save(4200).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "4200");
        assert_eq!(store.load().unwrap(), 4200);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileHighScoreStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_garbage_is_an_error_mapped_to_zero() {
        let path = temp_path("garbage");
        fs::write(&path, "not a number\n").unwrap();
        let store = FileHighScoreStore::new(&path);

        let err = store.load().unwrap_err();
        assert!(matches!(err, ScoreError::Malformed { ref content, .. } if content == "not a number"));
        assert_eq!(load_high_score(&store), 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_trailing_whitespace_accepted() {
        let path = temp_path("whitespace");
        fs::write(&path, " 77 \n").unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load().unwrap(), 77);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_memory_store_shared_between_clones() {
        let store = MemoryHighScoreStore::new(10);
        let handle = store.clone();
        persist_high_score(&store, 900);
        assert_eq!(handle.get(), 900);
        assert_eq!(load_high_score(&handle), 900);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = temp_path("dir_as_file");
        fs::create_dir_all(&dir).unwrap();
        let store = FileHighScoreStore::new(&dir);
        assert!(matches!(store.save(1), Err(ScoreError::Io { .. })));
        persist_high_score(&store, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_high_score_never_below_score(points in prop::collection::vec(0u32..2000, 0..30)) {
                let mut keeper = ScoreKeeper::new(0);
                for p in points {
                    keeper.add(p);
                    prop_assert!(keeper.high_score() >= keeper.score());
                }
            }
        }
    }
}
