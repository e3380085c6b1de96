use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::student::StudentId;

pub type Amount = Decimal;
pub type PaymentId = u32;

/// A single fee instalment, owned by exactly one student and
/// immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub amount_paid: Amount,
    pub payment_date: NaiveDate,
}

/// A payment joined with the owning student's identity, the shape
/// of the payments table view and the payments CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRow {
    pub payment_id: PaymentId,
    pub student_id: StudentId,
    pub name: String,
    pub aadhaar: String,
    pub amount_paid: Amount,
    pub payment_date: NaiveDate,
}

impl fmt::Display for PaymentRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} student #{} {} [{}]: ₹{:.2} on {}",
            self.payment_id,
            self.student_id,
            self.name,
            self.aadhaar,
            self.amount_paid,
            self.payment_date
        )
    }
}
