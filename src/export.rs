use std::fmt;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::core::Ledger;

const STUDENT_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "aadhaar",
    "qualification",
    "course_name",
    "phone_no",
    "full_fees",
    "remaining_balance",
    "date_of_joining",
];

const PAYMENT_COLUMNS: [&str; 6] = [
    "payment_id",
    "student_id",
    "name",
    "aadhaar",
    "amount_paid",
    "payment_date",
];

#[derive(Debug, Error)]
pub enum ExportError {
    /// Occurs when one of the output files cannot be created or
    /// written.
    #[error("could not write {}: {}", path.display(), source)]
    Csv { path: PathBuf, source: csv::Error },
}

/// What an export produced, for reporting back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub students: usize,
    pub payments: usize,
    pub students_file: PathBuf,
    pub payments_file: PathBuf,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported to {} and {} successfully!",
            self.students_file.display(),
            self.payments_file.display()
        )
    }
}

/// Writes the ledger out as two CSV files: one of students, one of
/// payments joined with the owning student's name and aadhaar. Both
/// files always start with a header row and replace whatever was
/// there before.
pub struct CsvExporter {
    students_path: PathBuf,
    payments_path: PathBuf,
}

impl CsvExporter {
    pub fn new(students_path: &Path, payments_path: &Path) -> CsvExporter {
        CsvExporter {
            students_path: students_path.to_path_buf(),
            payments_path: payments_path.to_path_buf(),
        }
    }

    pub fn export(&self, ledger: &Ledger) -> Result<ExportSummary, ExportError> {
        let students = ledger.list_students();
        write_rows(&self.students_path, &STUDENT_COLUMNS, &students)?;

        let payments = ledger.list_payments();
        write_rows(&self.payments_path, &PAYMENT_COLUMNS, &payments)?;

        info!(
            "exported {} students and {} payments",
            students.len(),
            payments.len()
        );
        return Ok(ExportSummary {
            students: students.len(),
            payments: payments.len(),
            students_file: self.students_path.clone(),
            payments_file: self.payments_path.clone(),
        });
    }
}

// The header row is written by hand rather than left to serde, so a
// file of zero records still carries its column names.
fn write_rows<S: Serialize>(path: &Path, columns: &[&str], rows: &[S]) -> Result<(), ExportError> {
    let fail = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(fail)?;
    writer.write_record(columns).map_err(fail)?;
    for row in rows {
        writer.serialize(row).map_err(fail)?;
    }
    writer.flush().map_err(|e| fail(e.into()))?;
    return Ok(());
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal::dec;

    use super::{CsvExporter, ExportError};
    use crate::core::{Ledger, NewStudent};

    #[fixture]
    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .register_student(NewStudent {
                name: "Asha Verma".to_owned(),
                aadhaar: "123412341234".to_owned(),
                qualification: "B.Sc".to_owned(),
                course_name: "Data Entry".to_owned(),
                phone_no: "9876543210".to_owned(),
                full_fees: dec!(10000),
                date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            })
            .unwrap();
        ledger
            .apply_payment(
                "123412341234",
                dec!(4000),
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            )
            .unwrap();
        return ledger;
    }

    fn exporter(dir: &Path) -> CsvExporter {
        CsvExporter::new(&dir.join("students.csv"), &dir.join("payments.csv"))
    }

    #[rstest]
    fn exported_files_carry_the_ledger(ledger: Ledger) {
        let dir = tempfile::tempdir().unwrap();

        let summary = exporter(dir.path()).export(&ledger).unwrap();

        assert_eq!(summary.students, 1);
        assert_eq!(summary.payments, 1);

        let students = fs::read_to_string(dir.path().join("students.csv")).unwrap();
        assert_eq!(
            students,
            "id,name,aadhaar,qualification,course_name,phone_no,full_fees,remaining_balance,date_of_joining\n\
             1,Asha Verma,123412341234,B.Sc,Data Entry,9876543210,10000,6000,2024-01-05\n"
        );

        let payments = fs::read_to_string(dir.path().join("payments.csv")).unwrap();
        assert_eq!(
            payments,
            "payment_id,student_id,name,aadhaar,amount_paid,payment_date\n\
             1,1,Asha Verma,123412341234,4000,2024-02-01\n"
        );
    }

    #[test]
    fn empty_ledger_still_writes_headers() {
        let dir = tempfile::tempdir().unwrap();

        let summary = exporter(dir.path()).export(&Ledger::new()).unwrap();

        assert_eq!(summary.students, 0);
        assert_eq!(summary.payments, 0);

        let students = fs::read_to_string(dir.path().join("students.csv")).unwrap();
        assert_eq!(
            students,
            "id,name,aadhaar,qualification,course_name,phone_no,full_fees,remaining_balance,date_of_joining\n"
        );
        let payments = fs::read_to_string(dir.path().join("payments.csv")).unwrap();
        assert_eq!(
            payments,
            "payment_id,student_id,name,aadhaar,amount_paid,payment_date\n"
        );
    }

    #[rstest]
    fn export_replaces_previous_files(ledger: Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let stale = "x".repeat(4096);
        fs::write(dir.path().join("students.csv"), &stale).unwrap();
        fs::write(dir.path().join("payments.csv"), &stale).unwrap();

        exporter(dir.path()).export(&ledger).unwrap();

        let students = fs::read_to_string(dir.path().join("students.csv")).unwrap();
        assert!(students.starts_with("id,name,aadhaar"));
        assert!(!students.contains("xxx"));
    }

    #[rstest]
    fn unwritable_destination_names_the_file(ledger: Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing").join("students.csv");
        let exporter = CsvExporter::new(&bad, &dir.path().join("payments.csv"));

        let res = exporter.export(&ledger);

        match res {
            Err(ExportError::Csv { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected a csv error, got {:?}", other),
        }
    }

    #[rstest]
    fn summary_prints_the_success_message(ledger: Ledger) {
        let dir = tempfile::tempdir().unwrap();

        let summary = exporter(dir.path()).export(&ledger).unwrap();

        let text = summary.to_string();
        assert!(text.starts_with("Exported to "));
        assert!(text.contains("students.csv"));
        assert!(text.contains("payments.csv"));
        assert!(text.ends_with("successfully!"));
    }
}
