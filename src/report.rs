//! Derived views over a ledger snapshot.
//!
//! Pure aggregation: nothing here mutates the ledger or touches the
//! backing file.

use crate::expense::Category;
use crate::money::Money;
use crate::store::Ledger;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Sums every expense by category.
///
/// Categories with no expenses are absent from the result, so an empty
/// ledger yields an empty map. Keys iterate in the fixed category order.
pub fn category_totals(ledger: &Ledger) -> BTreeMap<Category, Money> {
    let mut totals = BTreeMap::new();
    for expense in ledger.expenses() {
        let total = totals.entry(expense.category).or_insert(Money::ZERO);
        *total += expense.amount;
    }
    totals
}

/// Total spent in the same calendar month and year as `reference`.
pub fn monthly_total(ledger: &Ledger, reference: NaiveDate) -> Money {
    ledger
        .expenses()
        .iter()
        .filter(|e| e.date.year() == reference.year() && e.date.month() == reference.month())
        .map(|e| e.amount)
        .sum()
}

/// Budget figures derived from the whole ledger history.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProjection {
    /// Sum over every recorded expense, not just the current month.
    pub total_spent: Money,

    /// `budget - total_spent`; negative when overspent.
    pub remaining: Money,

    /// Even split of the remainder over the days left in the month.
    /// `None` on the last day of the month.
    pub suggested_daily: Option<Money>,
}

/// Projects `budget` against everything spent so far.
///
/// Total spend covers the full ledger while [`monthly_total`] covers one
/// month; the two are independent views and are not reconciled.
pub fn budget_projection(ledger: &Ledger, budget: Money, reference: NaiveDate) -> BudgetProjection {
    let total_spent: Money = ledger.expenses().iter().map(|e| e.amount).sum();
    let remaining = budget - total_spent;

    let remaining_days = days_in_month(reference) - reference.day();
    let suggested_daily = if remaining_days > 0 {
        Some(remaining / remaining_days)
    } else {
        None
    };

    BudgetProjection {
        total_spent,
        remaining,
        suggested_daily,
    }
}

/// Number of days in `date`'s month.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };

    // Safety: the first of a month is always constructible
    first_of_next
        .expect("first of month")
        .pred_opt()
        .expect("predecessor of first of month")
        .day()
}
