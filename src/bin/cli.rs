use std::path::PathBuf;
use std::process;

use anyhow::{self, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::info;

use feebook::{
    error::LedgerResult, payment::Amount, AppConfig, CsvExporter, JsonStore, Ledger, LedgerError,
    LedgerStore, NewStudent,
};

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to the config file naming the ledger and export locations
    #[clap(short, long, value_parser, default_value = "feebook.toml")]
    config: PathBuf,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Register a new student
    AddStudent(AddStudent),
    /// Record a fee instalment for a registered student
    AddPayment(AddPayment),
    /// List all students with their balances
    Students,
    /// List all recorded payments
    Payments,
    /// Show how much each student has paid so far
    Totals,
    /// Write the students and payments CSV files
    Export,
}

#[derive(Args, Debug)]
struct AddStudent {
    /// Full name of the student
    #[clap(short, long, value_parser)]
    name: String,

    /// Aadhaar number, must not be registered already
    #[clap(short, long, value_parser)]
    aadhaar: String,

    /// Highest qualification held
    #[clap(short, long, value_parser, default_value_t = String::new())]
    qualification: String,

    /// Course the student enrols in
    #[clap(short, long, value_parser, default_value_t = String::new())]
    course: String,

    /// Contact phone number
    #[clap(short, long, value_parser, default_value_t = String::new())]
    phone: String,

    /// Full course fee owed
    #[clap(short, long, value_parser)]
    fees: Amount,

    /// Date of joining, like 2024-01-05; today when omitted
    #[clap(short, long, value_parser)]
    joined: Option<NaiveDate>,
}

impl AddStudent {
    fn run(self, ledger: &mut Ledger) -> LedgerResult<()> {
        let id = ledger.register_student(NewStudent {
            name: self.name,
            aadhaar: self.aadhaar,
            qualification: self.qualification,
            course_name: self.course,
            phone_no: self.phone,
            full_fees: self.fees,
            date_of_joining: self.joined.unwrap_or_else(today),
        })?;

        info!("registered student #{}", id);
        println!("{}", "Student added successfully.".green());
        return Ok(());
    }
}

#[derive(Args, Debug)]
struct AddPayment {
    /// Aadhaar or phone number of the paying student
    #[clap(short, long, value_parser)]
    student: String,

    /// Instalment amount, at most the remaining balance
    #[clap(short, long, value_parser)]
    amount: Amount,

    /// Payment date, like 2024-02-01; today when omitted
    #[clap(short, long, value_parser)]
    date: Option<NaiveDate>,
}

impl AddPayment {
    fn run(self, ledger: &mut Ledger) -> LedgerResult<()> {
        let id = ledger.apply_payment(&self.student, self.amount, self.date.unwrap_or_else(today))?;

        info!("recorded payment #{}", id);
        println!("{}", "Payment recorded.".green());
        return Ok(());
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn print_students(ledger: &Ledger) {
    let students = ledger.list_students();
    if students.is_empty() {
        println!("No students found");
        return;
    }
    for student in students {
        let color = if student.remaining_balance > Amount::ZERO {
            colored::ColoredString::bright_red
        } else {
            colored::ColoredString::green
        };
        let fmt_balance = color(format!("₹{:.2}", student.remaining_balance).white());
        println!(
            "#{} {} [{}] {} - fees ₹{:.2}, balance {}",
            student.id,
            student.name,
            student.aadhaar,
            student.course_name,
            student.full_fees,
            fmt_balance
        );
    }
}

fn print_payments(ledger: &Ledger) {
    let payments = ledger.list_payments();
    if payments.is_empty() {
        println!("No payments found");
        return;
    }
    for row in payments {
        println!("{}", row);
    }
}

fn print_totals(ledger: &Ledger) {
    let totals = ledger.totals_by_student();
    if totals.is_empty() {
        println!("No payments found");
        return;
    }
    for (student_id, total) in totals {
        println!("Total paid by Student ID {}: ₹{:.2}", student_id, total);
    }
}

fn run_export(config: &AppConfig, ledger: &Ledger) -> Result<(), String> {
    let exporter = CsvExporter::new(&config.students_csv, &config.payments_csv);
    match exporter.export(ledger) {
        Ok(summary) => {
            println!("{}", summary.to_string().green());
            return Ok(());
        }
        Err(err) => return Err(format!("Export failed: {}", err)),
    }
}

fn rejection_line(err: &LedgerError) -> String {
    match err {
        LedgerError::DuplicateAadhaar(_) => "Error: Aadhaar already exists.".to_owned(),
        LedgerError::StudentNotFound(_) => "Student not found.".to_owned(),
        LedgerError::BalanceExceeded { .. } => "Payment exceeds balance.".to_owned(),
        other => format!("Error: {}.", other),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let config = AppConfig::read_or_default(&args.config)?;
    let store = JsonStore::new(&config.ledger_file);
    let mut ledger = store
        .read()
        .with_context(|| format!("could not load {}", config.ledger_file.display()))?;

    let outcome = match args.action {
        Subcommands::AddStudent(add) => add.run(&mut ledger).map_err(|e| rejection_line(&e)),
        Subcommands::AddPayment(pay) => pay.run(&mut ledger).map_err(|e| rejection_line(&e)),
        Subcommands::Students => {
            print_students(&ledger);
            Ok(())
        }
        Subcommands::Payments => {
            print_payments(&ledger);
            Ok(())
        }
        Subcommands::Totals => {
            print_totals(&ledger);
            Ok(())
        }
        Subcommands::Export => run_export(&config, &ledger),
    };

    match outcome {
        Ok(()) => store
            .save(&ledger)
            .with_context(|| format!("could not save {}", config.ledger_file.display()))?,
        Err(line) => {
            println!("{}", line.red());
            process::exit(1);
        }
    }
    return Ok(());
}
