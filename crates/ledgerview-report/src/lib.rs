//! Report collaborators for ledgerview
//!
//! The web layer is thin orchestration: it validates date parameters, calls
//! the collaborators defined here, and shapes view models. This crate holds
//! those collaborators:
//!
//! - [`period`] - date-parameter validation and calendar-range math
//! - [`grouping`] - the array utilities grouped aggregates are shaped with
//! - [`ReportQuery`] / [`ReportHelper`] - the aggregation contracts
//! - [`PreferenceStore`] - per-user settings the handlers read
//! - [`memory`] - the dataset-backed implementation of all three
//!
//! All query methods are read-only; nothing in this crate mutates the
//! dataset after load.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod grouping;
pub mod memory;
pub mod period;

use chrono::NaiveDate;
use ledgerview_core::{Account, BudgetRecord, Decimal, GroupedTotal, Preference, TransactionJournal};
use serde::{Deserialize, Serialize};

pub use memory::{Dataset, DatasetError, MemoryPreferences, MemoryReports};
pub use period::InvalidDate;

/// One budget's allocation and spending for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    /// Budget identifier.
    pub id: i64,
    /// Budget name.
    pub name: String,
    /// Amount allocated for the month.
    pub budgeted: Decimal,
    /// Spending against the budget in the month (negative).
    pub spent: Decimal,
    /// What remains of the allocation (`budgeted + spent`).
    pub left: Decimal,
}

/// The monthly budget rollup: one row per budget plus the month's
/// unbudgeted spending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetMonthReport {
    /// Per-budget rows, ordered by budget name.
    pub rows: Vec<BudgetRow>,
    /// Spending in the month not attached to any budget (negative).
    pub no_budget_spent: Decimal,
}

/// One account's balances over a calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBalanceLine {
    /// Account identifier.
    pub id: i64,
    /// Account name.
    pub name: String,
    /// Balance on January 1st.
    pub start_balance: Decimal,
    /// Balance on December 31st.
    pub end_balance: Decimal,
    /// `end_balance - start_balance`.
    pub difference: Decimal,
}

/// One month the navigation index links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthListEntry {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Display label, e.g. "March 2015".
    pub label: String,
}

/// Raw aggregated records over the dataset.
///
/// Every method is a read; ordering of returned rows is unspecified unless
/// documented. The handlers shape, sort and limit the results with the
/// [`grouping`] utilities.
pub trait ReportQuery: Send + Sync {
    /// Asset accounts with journal activity inside `[start, end]`, shared
    /// accounts included only when `include_shared` is set.
    fn get_all_accounts(&self, start: NaiveDate, end: NaiveDate, include_shared: bool)
        -> Vec<Account>;

    /// One record per budget with the account's spending against it in the
    /// period. Empty only when no budgets exist at all.
    fn get_budget_summary(&self, account: &Account, start: NaiveDate, end: NaiveDate)
        -> Vec<BudgetRecord>;

    /// Signed sum of the account's reconciled (balanced) transfers in the
    /// period.
    fn balanced_transactions_sum(&self, account: &Account, start: NaiveDate, end: NaiveDate)
        -> Decimal;

    /// The account's reconciled transfers in the period, by date.
    fn balanced_transactions_list(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<TransactionJournal>;

    /// The account's withdrawals and transfers in the period that carry no
    /// budget, by date.
    fn get_transactions_without_budget(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<TransactionJournal>;

    /// Deposits into the user's accounts in the period, by date.
    fn income_by_period(&self, start: NaiveDate, end: NaiveDate, include_shared: bool)
        -> Vec<TransactionJournal>;

    /// Withdrawal sums grouped by destination expense account (positive).
    fn journals_by_expense_account(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_shared: bool,
    ) -> Vec<GroupedTotal>;

    /// Deposit sums grouped by source revenue account (positive).
    fn journals_by_revenue_account(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_shared: bool,
    ) -> Vec<GroupedTotal>;

    /// Spending sums grouped by category (negative), shared accounts
    /// always excluded; their spending surfaces through
    /// [`Self::shared_expenses_by_category`].
    fn journals_by_category(&self, start: NaiveDate, end: NaiveDate) -> Vec<GroupedTotal>;

    /// Spending into shared accounts grouped by category (negative).
    fn shared_expenses_by_category(&self, start: NaiveDate, end: NaiveDate) -> Vec<GroupedTotal>;

    /// All asset accounts, shared ones included only when `include_shared`
    /// is set.
    fn account_list(&self, include_shared: bool) -> Vec<Account>;

    /// The account's signed balance at end of `date`.
    fn account_balance(&self, account: &Account, date: NaiveDate) -> Decimal;

    /// Look up an account by id.
    fn find_account(&self, id: i64) -> Option<Account>;

    /// Date of the earliest recorded journal, if any. Seeds the report
    /// navigation index.
    fn first_journal_date(&self) -> Option<NaiveDate>;
}

/// Higher-level derived reports.
pub trait ReportHelper: Send + Sync {
    /// The monthly budget rollup for the month containing `date`.
    fn get_budgets_for_month(&self, date: NaiveDate, include_shared: bool) -> BudgetMonthReport;

    /// Start/end balances per asset account for the year containing `date`.
    fn year_balance_report(&self, date: NaiveDate, include_shared: bool) -> Vec<YearBalanceLine>;

    /// Months with reports, from `since` through the latest journal,
    /// newest first.
    fn list_of_months(&self, since: NaiveDate) -> Vec<MonthListEntry>;

    /// Years with reports, from `since` through the latest journal,
    /// newest first.
    fn list_of_years(&self, since: NaiveDate) -> Vec<i32>;
}

/// Per-user settings.
pub trait PreferenceStore: Send + Sync {
    /// Read a boolean preference, falling back to `default` when unset.
    fn get_bool(&self, key: &str, default: bool) -> Preference;
}
