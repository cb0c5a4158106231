use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime, Time, error::ComponentRange};

use money_tracker::{
    Amount, Transaction, TransactionType, create_transaction,
    ensure_default_categories, initialize_db,
};

/// A utility for creating a test database for the money tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// The number of months of sample transactions to create, ending with the current month.
const SAMPLE_MONTHS: i64 = 3;

/// Amount, type, category, merchant and day of month for each monthly sample transaction.
const MONTHLY_TRANSACTIONS: [(f64, TransactionType, &str, &str, i64); 6] = [
    (4200.0, TransactionType::Income, "Salary", "Acme Ltd", 1),
    (1450.0, TransactionType::Expense, "Rent", "City Apartments", 2),
    (132.45, TransactionType::Expense, "Groceries", "FreshMart", 6),
    (54.20, TransactionType::Expense, "Transport", "Metro Card", 9),
    (87.90, TransactionType::Expense, "Dining", "Noodle Bar", 14),
    (118.35, TransactionType::Expense, "Groceries", "FreshMart", 20),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating default categories...");
    ensure_default_categories(&conn)?;

    println!("Creating sample transactions...");
    let this_month = OffsetDateTime::now_utc()
        .replace_day(1)?
        .replace_time(Time::MIDNIGHT);
    let mut count = 0;

    for months_ago in (0..SAMPLE_MONTHS).rev() {
        let month_start = start_of_month_before(this_month, months_ago)?;

        for &(amount, kind, category, merchant, day) in &MONTHLY_TRANSACTIONS {
            let date = month_start + Duration::days(day - 1) + Duration::hours(9);

            create_transaction(
                Transaction::build(Amount::new(amount)?, category)
                    .kind(kind)
                    .merchant(Some(merchant.to_owned()))
                    .date(Some(date)),
                &conn,
            )?;
            count += 1;
        }
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}

/// The first day of the month `months` months before `month_start`.
fn start_of_month_before(
    month_start: OffsetDateTime,
    months: i64,
) -> Result<OffsetDateTime, ComponentRange> {
    let mut date = month_start;

    for _ in 0..months {
        // One day before the first is in the previous month.
        date = (date - Duration::days(1)).replace_day(1)?;
    }

    Ok(date)
}
