use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::backend::interface::{BackendError, LedgerStore, Result};
use crate::core::Ledger;

/// Keeps the whole ledger as a single JSON document on disk.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: &Path) -> JsonStore {
        JsonStore {
            path: path.to_path_buf(),
        }
    }
}

impl LedgerStore for JsonStore {
    /// Loads the ledger, writing an empty one to disk first if the
    /// file does not exist yet. A file that fails to parse or fails
    /// its consistency check is refused and left untouched.
    fn read(&self) -> Result<Ledger> {
        if !self.path.exists() {
            info!("no ledger at {}, starting an empty one", self.path.display());
            self.save(&Ledger::new())?;
        }

        let text = fs::read_to_string(&self.path)?;
        let ledger: Ledger = serde_json::from_str(&text)?;
        ledger
            .consistency_check()
            .map_err(BackendError::Inconsistent)?;
        debug!("read ledger from {}", self.path.display());
        return Ok(ledger);
    }

    /// Serialises the full ledger before touching the file, so an
    /// encoding failure leaves the previous contents in place.
    fn save(&self, ledger: &Ledger) -> Result<()> {
        let text = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, text)?;
        debug!("saved ledger to {}", self.path.display());
        return Ok(());
    }
}
