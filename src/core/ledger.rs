use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::payment::{Amount, Payment, PaymentId, PaymentRow};
use crate::core::student::{NewStudent, Student, StudentId};

/// The whole persisted record set: students and the payments made
/// against them. The maps are keyed by id, so every listing comes
/// out in ascending id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    students: BTreeMap<StudentId, Student>,
    payments: BTreeMap<PaymentId, Payment>,
    next_student_id: StudentId,
    next_payment_id: PaymentId,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            students: BTreeMap::new(),
            payments: BTreeMap::new(),
            next_student_id: 1,
            next_payment_id: 1,
        }
    }

    /// Adds a student with a fresh id and a balance equal to the full
    /// fee. Fails without touching the ledger if a field is invalid or
    /// the aadhaar is already registered.
    pub fn register_student(&mut self, data: NewStudent) -> LedgerResult<StudentId> {
        data.validate()?;
        if self.students.values().any(|s| s.aadhaar == data.aadhaar) {
            return Err(LedgerError::DuplicateAadhaar(data.aadhaar));
        }

        let id = self.next_student_id;
        self.next_student_id += 1;
        self.students.insert(id, Student::new(id, data));
        return Ok(id);
    }

    /// Records an instalment against the student matching `identifier`
    /// and decrements their remaining balance by the same amount. A
    /// payment larger than the balance is rejected with no mutation;
    /// one equal to it is accepted and settles the account.
    pub fn apply_payment(
        &mut self,
        identifier: &str,
        amount: Amount,
        date: NaiveDate,
    ) -> LedgerResult<PaymentId> {
        if amount <= Amount::ZERO {
            return Err(LedgerError::Validation {
                field: "amount",
                reason: format!("must be positive, got {}", amount),
            });
        }

        let student_id = self
            .get_student_by_identifier(identifier)
            .map(|student| student.id)
            .ok_or_else(|| LedgerError::StudentNotFound(identifier.to_owned()))?;
        let student = self
            .students
            .get_mut(&student_id)
            .ok_or_else(|| LedgerError::StudentNotFound(identifier.to_owned()))?;

        if amount > student.remaining_balance {
            return Err(LedgerError::BalanceExceeded {
                amount,
                balance: student.remaining_balance,
            });
        }

        // Both mutations happen back to back with nothing fallible in
        // between, keeping balance and payment record in step.
        student.remaining_balance -= amount;
        let id = self.next_payment_id;
        self.next_payment_id += 1;
        self.payments.insert(
            id,
            Payment {
                id,
                student_id,
                amount_paid: amount,
                payment_date: date,
            },
        );
        return Ok(id);
    }

    /// Looks a student up by aadhaar or phone number: the one
    /// identifier is checked against both fields. Should it match more
    /// than one student, the lowest id wins.
    // TODO: guard against a phone number colliding with another
    // student's aadhaar at registration time
    pub fn get_student_by_identifier(&self, identifier: &str) -> Option<&Student> {
        self.students
            .values()
            .find(|student| student.aadhaar == identifier || student.phone_no == identifier)
    }

    /// All students, ascending by id.
    pub fn list_students(&self) -> Vec<&Student> {
        return self.students.values().collect();
    }

    /// All payments joined with the owning student's name and aadhaar,
    /// ascending by payment id.
    pub fn list_payments(&self) -> Vec<PaymentRow> {
        self.payments
            .values()
            .filter_map(|payment| {
                self.students
                    .get(&payment.student_id)
                    .map(|student| PaymentRow {
                        payment_id: payment.id,
                        student_id: payment.student_id,
                        name: student.name.clone(),
                        aadhaar: student.aadhaar.clone(),
                        amount_paid: payment.amount_paid,
                        payment_date: payment.payment_date,
                    })
            })
            .collect()
    }

    /// Per-student payment sums, derived from the payment records and
    /// never stored. Students without payments do not appear.
    pub fn totals_by_student(&self) -> BTreeMap<StudentId, Amount> {
        let mut totals = BTreeMap::new();
        for payment in self.payments.values() {
            *totals.entry(payment.student_id).or_insert(Amount::ZERO) += payment.amount_paid;
        }
        return totals;
    }

    /// Verifies that every payment belongs to a known student, that
    /// the id counters sit past every stored id, and that every
    /// balance equals the full fee minus the payments recorded. The
    /// backend runs this before trusting a freshly loaded file.
    pub fn consistency_check(&self) -> LedgerResult<()> {
        for payment in self.payments.values() {
            if !self.students.contains_key(&payment.student_id) {
                return Err(LedgerError::Inconsistent(format!(
                    "payment #{} references unknown student #{}",
                    payment.id, payment.student_id
                )));
            }
        }

        // a counter at or below a stored id would hand out that id
        // again and overwrite the record
        if let Some(highest) = self.students.keys().next_back() {
            if self.next_student_id <= *highest {
                return Err(LedgerError::Inconsistent(format!(
                    "next student id {} is behind student #{}",
                    self.next_student_id, highest
                )));
            }
        }
        if let Some(highest) = self.payments.keys().next_back() {
            if self.next_payment_id <= *highest {
                return Err(LedgerError::Inconsistent(format!(
                    "next payment id {} is behind payment #{}",
                    self.next_payment_id, highest
                )));
            }
        }

        // an edited file can pile payments past Decimal's range, so
        // the sum here is checked rather than panicking
        let mut totals: BTreeMap<StudentId, Amount> = BTreeMap::new();
        for payment in self.payments.values() {
            let entry = totals.entry(payment.student_id).or_insert(Amount::ZERO);
            *entry = entry.checked_add(payment.amount_paid).ok_or_else(|| {
                LedgerError::Inconsistent(format!(
                    "payments for student #{} overflow when summed",
                    payment.student_id
                ))
            })?;
        }

        for student in self.students.values() {
            let paid = totals.get(&student.id).copied().unwrap_or(Amount::ZERO);
            if paid > student.full_fees {
                return Err(LedgerError::Inconsistent(format!(
                    "student #{} has {} in payments against full fees of {}",
                    student.id, paid, student.full_fees
                )));
            }
            let expected = student.full_fees - paid;
            if student.remaining_balance != expected {
                return Err(LedgerError::Inconsistent(format!(
                    "student #{} balance is {} but {} minus {} paid leaves {}",
                    student.id, student.remaining_balance, student.full_fees, paid, expected
                )));
            }
        }
        return Ok(());
    }
}

impl Default for Ledger {
    fn default() -> Ledger {
        Ledger::new()
    }
}
