use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::payment::Amount;

pub type StudentId = u32;

/// A registered student. Field order is the order the columns appear
/// in the students CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub aadhaar: String,
    pub qualification: String,
    pub course_name: String,
    pub phone_no: String,
    pub full_fees: Amount,
    /// Always equals `full_fees` minus the sum of recorded payments.
    pub remaining_balance: Amount,
    pub date_of_joining: NaiveDate,
}

impl Student {
    pub fn new(id: StudentId, data: NewStudent) -> Student {
        Student {
            id,
            name: data.name,
            aadhaar: data.aadhaar,
            qualification: data.qualification,
            course_name: data.course_name,
            phone_no: data.phone_no,
            full_fees: data.full_fees,
            remaining_balance: data.full_fees,
            date_of_joining: data.date_of_joining,
        }
    }
}

/// Registration input: everything a [`Student`] carries except the
/// id and running balance, which the ledger assigns.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub aadhaar: String,
    pub qualification: String,
    pub course_name: String,
    pub phone_no: String,
    pub full_fees: Amount,
    pub date_of_joining: NaiveDate,
}

impl NewStudent {
    pub(crate) fn validate(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation {
                field: "name",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.aadhaar.trim().is_empty() {
            return Err(LedgerError::Validation {
                field: "aadhaar",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.full_fees < Amount::ZERO {
            return Err(LedgerError::Validation {
                field: "full_fees",
                reason: format!("must not be negative, got {}", self.full_fees),
            });
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal::dec;

    use super::{NewStudent, Student};
    use crate::core::error::LedgerError;

    #[fixture]
    fn registration() -> NewStudent {
        NewStudent {
            name: "Asha Verma".to_owned(),
            aadhaar: "123412341234".to_owned(),
            qualification: "B.Sc".to_owned(),
            course_name: "Data Entry".to_owned(),
            phone_no: "9876543210".to_owned(),
            full_fees: dec!(10000),
            date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[rstest]
    fn new_student_owes_the_full_fee(registration: NewStudent) {
        let student = Student::new(1, registration);

        assert_eq!(student.id, 1);
        assert_eq!(student.full_fees, dec!(10000));
        assert_eq!(student.remaining_balance, dec!(10000));
    }

    #[rstest]
    fn valid_registration_passes(registration: NewStudent) {
        assert!(registration.validate().is_ok());
    }

    #[rstest]
    #[case::empty_name("   ", "123412341234", "name")]
    #[case::empty_aadhaar("Asha Verma", "", "aadhaar")]
    fn missing_required_field_is_rejected(
        mut registration: NewStudent,
        #[case] name: &str,
        #[case] aadhaar: &str,
        #[case] field: &str,
    ) {
        registration.name = name.to_owned();
        registration.aadhaar = aadhaar.to_owned();

        let err = registration.validate().unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: f, .. } if f == field));
    }

    #[rstest]
    fn negative_fee_is_rejected(mut registration: NewStudent) {
        registration.full_fees = dec!(-1);

        let err = registration.validate().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation {
                field: "full_fees",
                ..
            }
        ));
    }

    #[rstest]
    fn zero_fee_is_allowed(mut registration: NewStudent) {
        registration.full_fees = dec!(0);
        assert!(registration.validate().is_ok());
    }
}
