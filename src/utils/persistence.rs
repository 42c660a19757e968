//! JSON persistence helpers for the ~/.neonflap/ save directory.
//!
//! The only persisted value is the high score; a missing or unreadable
//! file simply reads back as the default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const HIGH_SCORE_FILE: &str = "highscore.json";

/// On-disk shape of the high score record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScoreData {
    pub high_score: u32,
}

/// Get the ~/.neonflap/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".neonflap");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a save file in ~/.neonflap/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Load a JSON file from ~/.neonflap/, returning `T::default()` if missing
/// or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match save_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.neonflap/.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = save_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Best score across sessions; absent reads default to 0.
pub fn load_high_score() -> u32 {
    load_json_or_default::<HighScoreData>(HIGH_SCORE_FILE).high_score
}

pub fn save_high_score(high_score: u32) -> io::Result<()> {
    save_json(HIGH_SCORE_FILE, &HighScoreData { high_score })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_exists() {
        let dir = app_dir().expect("app_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(".neonflap"));
    }

    #[test]
    fn test_save_path_format() {
        let path = save_path("test.json").expect("save_path should succeed");
        assert!(path.to_string_lossy().ends_with(".neonflap/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let data: HighScoreData = load_json_or_default("nonexistent_test_file_98431.json");
        assert_eq!(data.high_score, 0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let data = HighScoreData { high_score: 27 };
        save_json("persistence_test.json", &data).expect("save should succeed");

        let loaded: HighScoreData = load_json_or_default("persistence_test.json");
        assert_eq!(loaded.high_score, 27);

        // Cleanup
        let path = save_path("persistence_test.json").unwrap();
        fs::remove_file(path).ok();
    }
}
