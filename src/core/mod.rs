pub mod student;
pub mod payment;
pub mod ledger;
pub mod error;

pub use student::{NewStudent, Student, StudentId};
pub use payment::{Amount, Payment, PaymentId, PaymentRow};
pub use ledger::Ledger;
pub use error::{LedgerError, LedgerResult};
