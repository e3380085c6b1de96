mod core;
mod backend;
mod config;
mod export;

pub use crate::core::{Amount, Ledger, LedgerError, LedgerResult, NewStudent};
pub use crate::core::{Payment, PaymentId, PaymentRow, Student, StudentId};
pub use crate::core::{error, ledger, payment, student};
pub use crate::backend::{BackendError, JsonStore, LedgerStore};
pub use crate::config::AppConfig;
pub use crate::export::{CsvExporter, ExportError, ExportSummary};
