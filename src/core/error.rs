use thiserror::Error;

use crate::core::payment::Amount;

#[derive(Debug, PartialEq, Error)]
pub enum LedgerError {
    /// Occurs when a registration or payment field is missing or
    /// malformed, e.g. an empty name or a non-positive amount.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },
    /// Occurs when registering a student whose aadhaar is already
    /// on the ledger.
    #[error("aadhaar {0} already exists")]
    DuplicateAadhaar(String),
    /// Occurs when no student's aadhaar or phone number matches
    /// the given identifier.
    #[error("no student matches {0}")]
    StudentNotFound(String),
    /// Occurs when a payment is larger than the student's
    /// remaining balance.
    #[error("payment of {amount} exceeds remaining balance {balance}")]
    BalanceExceeded { amount: Amount, balance: Amount },
    /// Occurs when stored balances disagree with the recorded
    /// payments, i.e. the ledger file was edited or corrupted.
    #[error("ledger inconsistent: {0}")]
    Inconsistent(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
