//! Expense Tracker CLI
//!
//! An interactive menu over the expense ledger: record expenses, list them,
//! and view category, monthly, and budget summaries.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [data-file] [monthly-budget]
//! ```
//!
//! Defaults to `expense.csv` in the working directory and a budget of 2000.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::Local;
use expense_tracker::{report, Category, Ledger, LedgerError, LedgerStore, Money, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::str::FromStr;

/// Display-only currency marker; stored amounts are plain decimals.
const CURRENCY: &str = "₹";

const DEFAULT_DATA_FILE: &str = "expense.csv";
const DEFAULT_BUDGET: &str = "2000";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let data_file = args.get(1).map_or(DEFAULT_DATA_FILE, String::as_str);
    let budget_arg = args.get(2).map_or(DEFAULT_BUDGET, String::as_str);
    let budget = Money::from_str(budget_arg).map_err(|_| LedgerError::Validation {
        message: format!("`{budget_arg}` is not a valid budget"),
    })?;

    let store = LedgerStore::new(data_file);
    let mut ledger = store.load()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Enter choice: ")? else {
            break; // input exhausted
        };

        match choice.as_str() {
            "1" => add_expense(&store, &mut ledger, &mut input)?,
            "2" => view_expenses(&store, &ledger),
            "3" => category_summary(&ledger),
            "4" => monthly_summary(&ledger),
            "5" => budget_analysis(&ledger, budget),
            "6" => delete_expense(&store, &mut ledger, &mut input)?,
            "7" => {
                println!("Exiting program...");
                break;
            }
            _ => println!("Invalid choice!"),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("==== Expense Tracker Menu ====");
    println!("1. Add Expense");
    println!("2. View All Expenses");
    println!("3. Category Summary");
    println!("4. Monthly Summary");
    println!("5. Budget Analysis");
    println!("6. Delete Expense");
    println!("7. Exit");
}

/// Prints `text` without a newline and reads one trimmed input line.
///
/// Returns `None` once input is exhausted.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_expense(store: &LedgerStore, ledger: &mut Ledger, input: &mut impl BufRead) -> Result<()> {
    let Some(name) = prompt(input, "Enter expense name: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt(input, "Enter expense amount: ")? else {
        return Ok(());
    };

    println!("Select category:");
    for (i, category) in Category::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, category);
    }
    let Some(pick) = prompt(input, "Enter choice: ")? else {
        return Ok(());
    };

    let category = match pick
        .parse::<usize>()
        .ok()
        .and_then(|n| Category::ALL.get(n.wrapping_sub(1)))
    {
        Some(category) => category.as_str(),
        None => {
            println!("Invalid category!");
            return Ok(());
        }
    };

    let today = Local::now().date_naive();
    match store.append(ledger, &name, category, &amount, today) {
        Ok((next, id)) => {
            *ledger = next;
            println!("Expense {id} added successfully!");
        }
        Err(LedgerError::Validation { message }) => println!("Invalid expense: {message}"),
        Err(e) => return Err(e),
    }

    Ok(())
}

fn view_expenses(store: &LedgerStore, ledger: &Ledger) {
    if ledger.is_empty() {
        println!("No expenses recorded.");
        return;
    }

    println!(
        "{:<5} {:<12} {:<20} {:<10} {:>12}",
        "ID", "Date", "Name", "Category", "Amount"
    );
    for expense in store.list(ledger) {
        println!(
            "{:<5} {:<12} {:<20} {:<10} {:>12}",
            expense.id,
            expense.date,
            expense.name,
            expense.category,
            format!("{}{:.2}", CURRENCY, expense.amount)
        );
    }
}

fn category_summary(ledger: &Ledger) {
    let totals = report::category_totals(ledger);
    if totals.is_empty() {
        println!("No data available.");
        return;
    }

    println!();
    println!("Expenses by Category:");
    for (category, total) in &totals {
        println!("{:<10} {}{:.2}", category, CURRENCY, total);
    }
}

fn monthly_summary(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("No data available.");
        return;
    }

    let total = report::monthly_total(ledger, Local::now().date_naive());
    println!();
    println!("Total spent this month: {CURRENCY}{total:.2}");
}

fn budget_analysis(ledger: &Ledger, budget: Money) {
    if ledger.is_empty() {
        println!("No expenses recorded.");
        return;
    }

    let projection = report::budget_projection(ledger, budget, Local::now().date_naive());
    println!();
    println!("Total Spent: {CURRENCY}{:.2}", projection.total_spent);
    println!("Remaining Budget: {CURRENCY}{:.2}", projection.remaining);
    if let Some(daily) = projection.suggested_daily {
        println!("Suggested Daily Budget: {CURRENCY}{daily:.2}");
    }
}

fn delete_expense(store: &LedgerStore, ledger: &mut Ledger, input: &mut impl BufRead) -> Result<()> {
    if ledger.is_empty() {
        println!("No expenses to delete.");
        return Ok(());
    }

    let Some(raw) = prompt(input, "Enter expense ID to delete: ")? else {
        return Ok(());
    };
    let id = match raw.parse::<u64>() {
        Ok(id) => id,
        Err(_) => {
            println!("Invalid expense ID!");
            return Ok(());
        }
    };

    match store.delete(ledger, id) {
        Ok(next) => {
            *ledger = next;
            println!("Expense deleted successfully!");
        }
        Err(LedgerError::NotFound { id }) => println!("Expense ID {id} not found!"),
        Err(e) => return Err(e),
    }

    Ok(())
}
