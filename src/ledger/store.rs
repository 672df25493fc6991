//! Ledger persistence
//!
//! Saves and loads the in-memory ledger contents as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::memory::LedgerState;

/// Ledger file errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Default location of the ledger file
pub fn default_ledger_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "summoner-skills", "SummonerSkills") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("ledger.json");
        path
    } else {
        PathBuf::from("./ledger.json")
    }
}

/// Load ledger contents; `Ok(None)` when no file exists yet
pub fn load_ledger(path: &Path) -> Result<Option<LedgerState>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    let state = serde_json::from_str(&data)?;
    log::info!("Ledger loaded from {}", path.display());
    Ok(Some(state))
}

/// Write ledger contents, creating parent directories as needed
pub fn save_ledger(path: &Path, state: &LedgerState) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    log::debug!("Ledger saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codex::AttributeScores;
    use crate::ledger::SummonerRecord;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("summoner-skills-store-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file() {
        let path = scratch_file("absent.json");
        assert!(load_ledger(&path).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_file("ledger.json");
        let mut state = LedgerState::default();
        let mut record = SummonerRecord::new(9);
        record.attributes = AttributeScores::new(10, 16, 10, 14, 10, 12);
        record.skills.set(22, 3);
        record.xp = 1250;
        state.summoners.insert(4, record);
        state.next_id = 5;

        save_ledger(&path, &state).unwrap();
        let loaded = load_ledger(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file() {
        let path = scratch_file("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_ledger(&path), Err(StoreError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}
