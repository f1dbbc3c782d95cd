//! View models the report pages render from.

use chrono::NaiveDate;
use ledgerview_core::{BudgetRecord, Decimal, GroupedTotal, TransactionJournal};
use ledgerview_report::{BudgetMonthReport, MonthListEntry, YearBalanceLine};
use serde::Serialize;
use std::collections::BTreeMap;

/// One journal as shown in a report list.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JournalLine {
    /// Journal identifier.
    pub id: i64,
    /// Date of the transaction.
    pub date: NaiveDate,
    /// Description text.
    pub description: String,
    /// Positive amount moved.
    pub amount: Decimal,
}

impl From<TransactionJournal> for JournalLine {
    fn from(journal: TransactionJournal) -> Self {
        Self {
            id: journal.id,
            date: journal.date,
            description: journal.description,
            amount: journal.amount,
        }
    }
}

/// One account's balances over the reported month.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccountSummaryLine {
    /// Account identifier.
    pub id: i64,
    /// Account name.
    pub name: String,
    /// Balance at the start of the period.
    pub start_balance: Decimal,
    /// Balance at the end of the period.
    pub end_balance: Decimal,
    /// `end_balance - start_balance`.
    pub difference: Decimal,
}

/// The monthly report view model.
#[derive(Serialize, Debug, Clone)]
pub struct MonthView {
    /// Page subtitle, e.g. "Report for March 2015".
    pub subtitle: String,
    /// Income journals for the month.
    pub income: Vec<JournalLine>,
    /// Sum of the income amounts.
    pub income_total: Decimal,
    /// Top expense accounts, largest spend first, at most ten.
    pub expenses: Vec<GroupedTotal>,
    /// The monthly budget rollup.
    pub budgets: BudgetMonthReport,
    /// Top categories, largest spend first, at most ten. Amounts negative.
    pub categories: Vec<GroupedTotal>,
    /// Per-account balances with their difference.
    pub accounts: Vec<AccountSummaryLine>,
}

/// One account's budget breakdown in the budget report.
#[derive(Serialize, Debug, Clone)]
pub struct AccountBudgetBlock {
    /// Account identifier.
    pub id: i64,
    /// Account name.
    pub name: String,
    /// True iff every budget amount for this account is exactly zero.
    pub hide: bool,
    /// Per-budget records keyed by budget id.
    pub budgets: BTreeMap<i64, BudgetRecord>,
    /// Signed sum of the account's reconciled transfers.
    pub balanced_amount: Decimal,
}

/// The budget report view model.
#[derive(Serialize, Debug, Clone)]
pub struct BudgetView {
    /// Page subtitle, e.g. "Budget report for March 2015".
    pub subtitle: String,
    /// First day of the reported month.
    pub date: NaiveDate,
    /// The day before the reported month starts.
    pub day_early: NaiveDate,
    /// Per-account budget breakdowns.
    pub accounts: Vec<AccountBudgetBlock>,
    /// The monthly budget rollup.
    pub budgets: BudgetMonthReport,
}

/// The yearly report view model.
#[derive(Serialize, Debug, Clone)]
pub struct YearView {
    /// The reported year.
    pub year: i32,
    /// Start/end balances per account.
    pub balances: Vec<YearBalanceLine>,
    /// Income sums grouped by revenue account.
    pub grouped_incomes: Vec<GroupedTotal>,
    /// Expense sums grouped by expense account.
    pub grouped_expenses: Vec<GroupedTotal>,
}

/// The report navigation index view model.
#[derive(Serialize, Debug, Clone)]
pub struct IndexView {
    /// Months with reports, newest first.
    pub months: Vec<MonthListEntry>,
    /// Years with reports, newest first.
    pub years: Vec<i32>,
}
