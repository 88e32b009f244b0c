//! JSON persistence for the high score and the leaderboard.
//!
//! Both live as small files in one data directory. A missing file reads as
//! an empty value.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use planet_defense_core::leaderboard::{Leaderboard, LeaderboardEntry};

const HIGH_SCORE_FILE: &str = "high_score.json";
const LEADERBOARD_FILE: &str = "leaderboard.json";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage i/o failed: {err}"),
            Self::Parse(err) => write!(f, "stored data is malformed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// File-backed score storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    dir: PathBuf,
}

impl ScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_high_score(&self) -> Result<u32, StoreError> {
        Ok(read_json::<u32>(&self.dir.join(HIGH_SCORE_FILE))?.unwrap_or(0))
    }

    pub fn save_high_score(&self, score: u32) -> Result<(), StoreError> {
        self.write_json(HIGH_SCORE_FILE, &score)
    }

    pub fn load_leaderboard(&self) -> Result<Leaderboard, StoreError> {
        let entries: Option<Vec<LeaderboardEntry>> =
            read_json(&self.dir.join(LEADERBOARD_FILE))?;
        Ok(entries.map(Leaderboard::from_entries).unwrap_or_default())
    }

    pub fn save_leaderboard(&self, board: &Leaderboard) -> Result<(), StoreError> {
        self.write_json(LEADERBOARD_FILE, board.entries())
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(file), json)?;
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let (y, m, d) = civil_from_days((secs / 86_400) as i64);
    format!("{y:04}-{m:02}-{d:02}")
}

/// Proleptic Gregorian date for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("nested"));
        assert_eq!(store.load_high_score().unwrap(), 0);
        assert!(store.load_leaderboard().unwrap().is_empty());
    }

    #[test]
    fn test_high_score_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path());
        store.save_high_score(4200).unwrap();
        assert_eq!(ScoreStore::new(dir.path()).load_high_score().unwrap(), 4200);
    }

    #[test]
    fn test_leaderboard_persists_in_rank_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path());
        let mut board = Leaderboard::new();
        board.add_entry("ada", 900, 3, 0.5, "2026-01-02");
        board.add_entry("bob", 1500, 4, 0.75, "2026-01-03");
        store.save_leaderboard(&board).unwrap();

        let loaded = store.load_leaderboard().unwrap();
        assert_eq!(loaded, board);
        assert_eq!(loaded.entries()[0].name, "bob");
        assert_eq!(loaded.entries()[0].accuracy, 75);
    }

    #[test]
    fn test_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("nested").join("scores"));
        store.save_high_score(10).unwrap();
        assert!(store.dir().join(HIGH_SCORE_FILE).is_file());
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(HIGH_SCORE_FILE), "not json").unwrap();
        let store = ScoreStore::new(dir.path());
        assert!(matches!(store.load_high_score(), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(20_454), (2026, 1, 1));
    }

    #[test]
    fn test_today_is_iso_date() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[7..8], "-");
    }
}
