//! Ledger snapshots and their durable CSV form.
//!
//! [`LedgerStore`] owns only the backing file path. Every operation takes a
//! ledger snapshot and returns a new one, so there is no hidden shared
//! mutable state between the in-memory table and the file.
//!
//! Persistence is a whole-file rewrite: each mutation serializes the full
//! snapshot to a sibling temp file and renames it into place.

use crate::error::{LedgerError, Result};
use crate::expense::{Category, Expense};
use crate::money::Money;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Column order of the backing file.
pub const HEADER: [&str; 5] = ["ID", "Date", "Name", "Category", "Amount"];

/// An ordered snapshot of every recorded expense.
///
/// Insertion order is preserved across load and append; deletion removes one
/// record without reordering survivors. All ids are distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    pub(crate) fn from_expenses(expenses: Vec<Expense>) -> Self {
        Ledger { expenses }
    }

    /// Records in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Returns `true` if no expenses are recorded.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Number of recorded expenses.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Id to assign next: `max existing id + 1`, or 1 when empty.
    fn next_id(&self) -> u64 {
        self.expenses
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// Bridges ledger snapshots and their backing CSV file.
///
/// `load`, `append`, and `delete` touch durable storage; `list` does not.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Creates a store over the given backing file path.
    ///
    /// No I/O happens until [`load`](Self::load) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LedgerStore { path: path.into() }
    }

    /// Loads the full ledger from the backing file.
    ///
    /// A missing file is created empty, with the expected header, and an
    /// empty ledger is returned. A file whose header differs from [`HEADER`]
    /// is rejected with [`LedgerError::Header`]. Rows that fail to parse
    /// (bad id, date, category, or amount) and rows repeating an id already
    /// seen are logged at warn level and skipped.
    pub fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            let empty = Ledger::new();
            self.save(&empty)?;
            debug!("created empty expense file at {}", self.path.display());
            return Ok(empty);
        }

        let file = fs::File::open(&self.path)?;
        let ledger = read_ledger(file)?;
        debug!(
            "loaded {} expenses from {}",
            ledger.len(),
            self.path.display()
        );
        Ok(ledger)
    }

    /// Rewrites the backing file with the full snapshot.
    ///
    /// Writes to a sibling temp file first and renames it into place, so an
    /// interrupted save leaves the previous contents intact.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let file = fs::File::create(&tmp)?;
        write_ledger(ledger, file)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Validates raw input, appends a new expense dated `today`, persists,
    /// and returns the new snapshot with the assigned id.
    ///
    /// Fails with [`LedgerError::Validation`] when the name is empty, the
    /// category is outside the fixed set, or the amount is not numeric; the
    /// ledger and the backing file are left unchanged in that case.
    pub fn append(
        &self,
        ledger: &Ledger,
        name: &str,
        category: &str,
        amount: &str,
        today: NaiveDate,
    ) -> Result<(Ledger, u64)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation {
                message: "expense name is empty".to_string(),
            });
        }
        let category = Category::from_str(category).map_err(|_| LedgerError::Validation {
            message: format!("`{category}` is not a known category"),
        })?;
        let amount = Money::from_str(amount).map_err(|_| LedgerError::Validation {
            message: format!("`{amount}` is not a number"),
        })?;

        let id = ledger.next_id();
        let mut expenses = ledger.expenses.clone();
        expenses.push(Expense {
            id,
            date: today,
            name: name.to_string(),
            category,
            amount,
        });
        let next = Ledger::from_expenses(expenses);
        self.save(&next)?;
        debug!("appended expense {id} ({category}, {amount})");
        Ok((next, id))
    }

    /// Removes the expense with `id`, persists, and returns the new snapshot.
    ///
    /// Fails with [`LedgerError::NotFound`] when no such id exists; nothing
    /// is written in that case.
    pub fn delete(&self, ledger: &Ledger, id: u64) -> Result<Ledger> {
        if !ledger.expenses.iter().any(|e| e.id == id) {
            return Err(LedgerError::NotFound { id });
        }
        let expenses = ledger
            .expenses
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        let next = Ledger::from_expenses(expenses);
        self.save(&next)?;
        debug!("deleted expense {id}");
        Ok(next)
    }

    /// Current snapshot contents, read-only. No I/O.
    pub fn list<'a>(&self, ledger: &'a Ledger) -> &'a [Expense] {
        ledger.expenses()
    }
}

/// Parses a full CSV table into a ledger snapshot.
fn read_ledger<R: Read>(reader: R) -> Result<Ledger> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let found: Vec<&str> = csv_reader.headers()?.iter().collect();
    if found != HEADER {
        return Err(LedgerError::Header {
            found: found.join(","),
        });
    }

    let mut expenses: Vec<Expense> = Vec::new();
    let mut seen = HashSet::new();
    for (row_idx, row) in csv_reader.deserialize::<Expense>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        match row {
            Ok(expense) => {
                if !seen.insert(expense.id) {
                    warn!("row {}: duplicate expense id {}, skipping", row_num, expense.id);
                    continue;
                }
                expenses.push(expense);
            }
            Err(e) => warn!("row {}: skipping malformed expense: {}", row_num, e),
        }
    }

    Ok(Ledger::from_expenses(expenses))
}

/// Serializes the full snapshot, header first.
fn write_ledger<W: Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for expense in ledger.expenses() {
        csv_writer.serialize(expense)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_str(csv: &str) -> Result<Ledger> {
        read_ledger(Cursor::new(csv))
    }

    fn write_str(ledger: &Ledger) -> String {
        let mut output = Vec::new();
        write_ledger(ledger, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn expense(id: u64, date: &str, name: &str, category: Category, amount: &str) -> Expense {
        Expense {
            id,
            date: date.parse().unwrap(),
            name: name.to_string(),
            category,
            amount: amount.parse().unwrap(),
        }
    }

    #[test]
    fn test_read_simple_table() {
        let ledger = read_str(
            "ID,Date,Name,Category,Amount\n\
             1,2024-03-01,lunch,Food,12.5\n\
             2,2024-03-02,train,Travel,7\n",
        )
        .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.expenses()[0],
            expense(1, "2024-03-01", "lunch", Category::Food, "12.5")
        );
        assert_eq!(
            ledger.expenses()[1],
            expense(2, "2024-03-02", "train", Category::Travel, "7")
        );
    }

    #[test]
    fn test_read_trims_whitespace() {
        let ledger = read_str(
            "ID, Date, Name, Category, Amount\n\
             1, 2024-03-01, lunch , Food , 12.5\n",
        )
        .unwrap();

        assert_eq!(ledger.expenses()[0].name, "lunch");
        assert_eq!(ledger.expenses()[0].category, Category::Food);
    }

    #[test]
    fn test_read_rejects_wrong_header() {
        let result = read_str("ID,Name,Amount\n1,lunch,12.5\n");
        assert!(matches!(result, Err(LedgerError::Header { .. })));

        let result = read_str("");
        assert!(matches!(result, Err(LedgerError::Header { .. })));
    }

    #[test]
    fn test_read_skips_malformed_rows() {
        let ledger = read_str(
            "ID,Date,Name,Category,Amount\n\
             1,2024-03-01,lunch,Food,12.5\n\
             2,not-a-date,train,Travel,7\n\
             3,2024-03-03,vitamins,Groceries,9\n\
             4,2024-03-04,socks,Shopping,abc\n\
             5,2024-03-05,rent,Home,800\n",
        )
        .unwrap();

        let ids: Vec<u64> = ledger.expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 5]);
    }

    #[test]
    fn test_read_skips_duplicate_ids() {
        let ledger = read_str(
            "ID,Date,Name,Category,Amount\n\
             1,2024-03-01,lunch,Food,12.5\n\
             1,2024-03-02,dinner,Food,20\n",
        )
        .unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.expenses()[0].name, "lunch");
    }

    #[test]
    fn test_write_empty_ledger_emits_header() {
        assert_eq!(write_str(&Ledger::new()), "ID,Date,Name,Category,Amount\n");
    }

    #[test]
    fn test_write_read_round_trip_preserves_order() {
        let ledger = Ledger::from_expenses(vec![
            expense(3, "2024-03-01", "lunch", Category::Food, "12.5"),
            expense(1, "2024-03-02", "train", Category::Travel, "7"),
            expense(2, "2024-03-03", "rent", Category::Home, "800"),
        ]);

        let round_tripped = read_str(&write_str(&ledger)).unwrap();
        assert_eq!(round_tripped, ledger);
    }

    #[test]
    fn test_write_quotes_delimiter_in_name() {
        let ledger = Ledger::from_expenses(vec![expense(
            1,
            "2024-03-01",
            "coffee, cake",
            Category::Food,
            "9",
        )]);

        let output = write_str(&ledger);
        assert!(output.contains("\"coffee, cake\""));

        let round_tripped = read_str(&output).unwrap();
        assert_eq!(round_tripped.expenses()[0].name, "coffee, cake");
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        assert_eq!(Ledger::new().next_id(), 1);

        let ledger = Ledger::from_expenses(vec![
            expense(2, "2024-03-01", "lunch", Category::Food, "12.5"),
            expense(7, "2024-03-02", "train", Category::Travel, "7"),
            expense(4, "2024-03-03", "rent", Category::Home, "800"),
        ]);
        assert_eq!(ledger.next_id(), 8);
    }
}
