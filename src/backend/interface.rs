use thiserror::Error;

use crate::core::{Ledger, LedgerError};

pub type Result<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Occurs when the ledger file cannot be opened, created or
    /// written.
    #[error("ledger file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Occurs when the ledger file holds text that does not parse as
    /// a ledger document.
    #[error("ledger file is not valid: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Occurs when a freshly loaded ledger fails its consistency
    /// check, i.e. the file was edited by hand or corrupted.
    #[error("refusing inconsistent ledger: {0}")]
    Inconsistent(LedgerError),
}

pub trait LedgerStore {
    fn read(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
