//! # Ledger Snapshot Files
//!
//! A missing file is an empty ledger. Writes go to a sibling temporary file
//! that is then renamed over the target.

use std::path::Path;

use anyhow::{Context, Result};
use lran_ledger::{LedgerSnapshot, MemoryLedger};

/// Load the ledger stored at `path`, or an empty one if there is none.
pub fn load(path: &Path) -> Result<MemoryLedger> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no snapshot found, starting empty ledger");
        return Ok(MemoryLedger::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ledger snapshot {}", path.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse ledger snapshot {}", path.display()))?;
    let ledger = MemoryLedger::from_snapshot(snapshot)
        .with_context(|| format!("inconsistent ledger snapshot {}", path.display()))?;
    tracing::debug!(path = %path.display(), version = ledger.version(), keys = ledger.len(), "snapshot loaded");
    Ok(ledger)
}

/// Write `ledger` to `path`.
pub fn save(path: &Path, ledger: &MemoryLedger) -> Result<()> {
    let snapshot = ledger.snapshot()?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("failed to write ledger snapshot {}", path.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace ledger snapshot {}", path.display()))?;
    tracing::debug!(path = %path.display(), version = snapshot.version, "snapshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lran_ledger::{EntityStore, Transaction};

    #[test]
    fn missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = load(&dir.path().join("none.json")).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.version(), 0);
    }

    #[test]
    fn saved_ledger_reloads_with_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");

        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        tx.put_json("land-L1", &serde_json::json!({"ID": "L1", "Type": "LAND"}))
            .unwrap();
        tx.commit().unwrap();
        save(&path, &ledger).unwrap();

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.version(), 1);
        assert_eq!(reloaded.get("land-L1").unwrap().unwrap().version, 1);
        assert!(!dir.path().join("net.json.tmp").exists());
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load(&path).is_err());
    }
}
