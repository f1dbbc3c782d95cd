//! Dataset-backed implementation of the report collaborators.
//!
//! The server loads one [`Dataset`] (a JSON file of accounts, journals,
//! budgets, budget limits, categories and preferences) at startup and keeps
//! it immutable behind an [`Arc`]. [`MemoryReports`] answers every query and
//! helper contract by iterating that dataset; nothing here caches or writes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use ledgerview_core::{
    Account, AccountKind, Budget, BudgetLimit, BudgetRecord, Category, Decimal, GroupedTotal,
    JournalKind, Preference, TransactionJournal,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    period, BudgetMonthReport, BudgetRow, MonthListEntry, PreferenceStore, ReportHelper,
    ReportQuery, YearBalanceLine,
};

/// Error loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid dataset document.
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the report server knows about one user's finances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// All accounts, any kind.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// All recorded journals.
    #[serde(default)]
    pub journals: Vec<TransactionJournal>,
    /// Budget envelopes.
    #[serde(default)]
    pub budgets: Vec<Budget>,
    /// Monthly allocations per budget.
    #[serde(default)]
    pub budget_limits: Vec<BudgetLimit>,
    /// Spending categories.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// User preferences, keyed by preference name.
    #[serde(default)]
    pub preferences: HashMap<String, bool>,
}

impl Dataset {
    /// Load a dataset from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Query and helper implementation over an in-memory [`Dataset`].
#[derive(Clone)]
pub struct MemoryReports {
    data: Arc<Dataset>,
}

impl MemoryReports {
    /// Create a new report source over the dataset.
    #[must_use]
    pub fn new(data: Arc<Dataset>) -> Self {
        Self { data }
    }

    fn account(&self, id: i64) -> Option<&Account> {
        self.data.accounts.iter().find(|a| a.id == id)
    }

    fn account_name(&self, id: i64) -> String {
        self.account(id)
            .map_or_else(|| format!("account #{id}"), |a| a.name.clone())
    }

    fn category_name(&self, id: i64) -> String {
        self.data
            .categories
            .iter()
            .find(|c| c.id == id)
            .map_or_else(|| format!("category #{id}"), |c| c.name.clone())
    }

    /// Shared accounts only pass when the preference allows them. Unknown
    /// account ids pass so malformed data still shows up in reports.
    fn passes_shared(&self, account_id: i64, include_shared: bool) -> bool {
        include_shared || !self.account(account_id).is_some_and(|a| a.shared)
    }

    fn journals_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &TransactionJournal> {
        self.data
            .journals
            .iter()
            .filter(move |j| j.date >= start && j.date <= end)
    }

    fn by_date(mut journals: Vec<TransactionJournal>) -> Vec<TransactionJournal> {
        journals.sort_by_key(|j| (j.date, j.id));
        journals
    }

    fn grouped(rows: BTreeMap<i64, GroupedTotal>) -> Vec<GroupedTotal> {
        rows.into_values().collect()
    }

    fn last_journal_date(&self) -> Option<NaiveDate> {
        self.data.journals.iter().map(|j| j.date).max()
    }
}

impl ReportQuery for MemoryReports {
    fn get_all_accounts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_shared: bool,
    ) -> Vec<Account> {
        self.data
            .accounts
            .iter()
            .filter(|a| a.kind == AccountKind::Asset)
            .filter(|a| include_shared || !a.shared)
            .filter(|a| {
                self.journals_between(start, end)
                    .any(|j| j.touches(a.id))
            })
            .cloned()
            .collect()
    }

    fn get_budget_summary(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<BudgetRecord> {
        self.data
            .budgets
            .iter()
            .map(|budget| {
                let spent: Decimal = self
                    .journals_between(start, end)
                    .filter(|j| j.kind == JournalKind::Withdrawal)
                    .filter(|j| j.from_account_id == account.id)
                    .filter(|j| j.budget_id == Some(budget.id))
                    .map(|j| j.amount)
                    .sum();
                BudgetRecord::new(budget.id, budget.name.clone(), -spent)
            })
            .collect()
    }

    fn balanced_transactions_sum(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Decimal {
        self.journals_between(start, end)
            .filter(|j| j.kind == JournalKind::Transfer && j.balanced)
            .map(|j| j.signed_amount(account.id))
            .sum()
    }

    fn balanced_transactions_list(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<TransactionJournal> {
        Self::by_date(
            self.journals_between(start, end)
                .filter(|j| j.kind == JournalKind::Transfer && j.balanced)
                .filter(|j| j.touches(account.id))
                .cloned()
                .collect(),
        )
    }

    fn get_transactions_without_budget(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<TransactionJournal> {
        Self::by_date(
            self.journals_between(start, end)
                .filter(|j| j.kind != JournalKind::Deposit)
                .filter(|j| j.budget_id.is_none())
                .filter(|j| j.touches(account.id))
                .cloned()
                .collect(),
        )
    }

    fn income_by_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_shared: bool,
    ) -> Vec<TransactionJournal> {
        Self::by_date(
            self.journals_between(start, end)
                .filter(|j| j.kind == JournalKind::Deposit)
                .filter(|j| self.passes_shared(j.to_account_id, include_shared))
                .cloned()
                .collect(),
        )
    }

    fn journals_by_expense_account(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_shared: bool,
    ) -> Vec<GroupedTotal> {
        let mut rows: BTreeMap<i64, GroupedTotal> = BTreeMap::new();
        for journal in self
            .journals_between(start, end)
            .filter(|j| j.kind == JournalKind::Withdrawal)
            .filter(|j| self.passes_shared(j.from_account_id, include_shared))
        {
            rows.entry(journal.to_account_id)
                .and_modify(|row| row.amount += journal.amount)
                .or_insert_with(|| {
                    GroupedTotal::new(
                        journal.to_account_id,
                        self.account_name(journal.to_account_id),
                        journal.amount,
                    )
                });
        }
        Self::grouped(rows)
    }

    fn journals_by_revenue_account(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_shared: bool,
    ) -> Vec<GroupedTotal> {
        let mut rows: BTreeMap<i64, GroupedTotal> = BTreeMap::new();
        for journal in self
            .journals_between(start, end)
            .filter(|j| j.kind == JournalKind::Deposit)
            .filter(|j| self.passes_shared(j.to_account_id, include_shared))
        {
            rows.entry(journal.from_account_id)
                .and_modify(|row| row.amount += journal.amount)
                .or_insert_with(|| {
                    GroupedTotal::new(
                        journal.from_account_id,
                        self.account_name(journal.from_account_id),
                        journal.amount,
                    )
                });
        }
        Self::grouped(rows)
    }

    fn journals_by_category(&self, start: NaiveDate, end: NaiveDate) -> Vec<GroupedTotal> {
        let mut rows: BTreeMap<i64, GroupedTotal> = BTreeMap::new();
        for journal in self
            .journals_between(start, end)
            .filter(|j| j.kind == JournalKind::Withdrawal)
            .filter(|j| self.passes_shared(j.from_account_id, false))
        {
            let Some(category_id) = journal.category_id else {
                continue;
            };
            rows.entry(category_id)
                .and_modify(|row| row.amount -= journal.amount)
                .or_insert_with(|| {
                    GroupedTotal::new(category_id, self.category_name(category_id), -journal.amount)
                });
        }
        Self::grouped(rows)
    }

    fn shared_expenses_by_category(&self, start: NaiveDate, end: NaiveDate) -> Vec<GroupedTotal> {
        let mut rows: BTreeMap<i64, GroupedTotal> = BTreeMap::new();
        for journal in self
            .journals_between(start, end)
            .filter(|j| j.kind == JournalKind::Transfer)
            .filter(|j| self.account(j.to_account_id).is_some_and(|a| a.shared))
        {
            let Some(category_id) = journal.category_id else {
                continue;
            };
            rows.entry(category_id)
                .and_modify(|row| row.amount -= journal.amount)
                .or_insert_with(|| {
                    GroupedTotal::new(category_id, self.category_name(category_id), -journal.amount)
                });
        }
        Self::grouped(rows)
    }

    fn account_list(&self, include_shared: bool) -> Vec<Account> {
        self.data
            .accounts
            .iter()
            .filter(|a| a.kind == AccountKind::Asset)
            .filter(|a| include_shared || !a.shared)
            .cloned()
            .collect()
    }

    fn account_balance(&self, account: &Account, date: NaiveDate) -> Decimal {
        self.data
            .journals
            .iter()
            .filter(|j| j.date <= date)
            .map(|j| j.signed_amount(account.id))
            .sum()
    }

    fn find_account(&self, id: i64) -> Option<Account> {
        self.account(id).cloned()
    }

    fn first_journal_date(&self) -> Option<NaiveDate> {
        self.data.journals.iter().map(|j| j.date).min()
    }
}

impl ReportHelper for MemoryReports {
    fn get_budgets_for_month(&self, date: NaiveDate, include_shared: bool) -> BudgetMonthReport {
        let (start, end) = period::month_bounds(date);

        let mut rows: Vec<BudgetRow> = self
            .data
            .budgets
            .iter()
            .map(|budget| {
                let budgeted: Decimal = self
                    .data
                    .budget_limits
                    .iter()
                    .filter(|l| l.budget_id == budget.id && l.month == start)
                    .map(|l| l.amount)
                    .sum();
                let spent: Decimal = self
                    .journals_between(start, end)
                    .filter(|j| j.kind == JournalKind::Withdrawal)
                    .filter(|j| j.budget_id == Some(budget.id))
                    .filter(|j| self.passes_shared(j.from_account_id, include_shared))
                    .map(|j| -j.amount)
                    .sum();
                BudgetRow {
                    id: budget.id,
                    name: budget.name.clone(),
                    budgeted,
                    spent,
                    left: budgeted + spent,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        let no_budget_spent: Decimal = self
            .journals_between(start, end)
            .filter(|j| j.kind == JournalKind::Withdrawal)
            .filter(|j| j.budget_id.is_none())
            .filter(|j| self.passes_shared(j.from_account_id, include_shared))
            .map(|j| -j.amount)
            .sum();

        BudgetMonthReport {
            rows,
            no_budget_spent,
        }
    }

    fn year_balance_report(&self, date: NaiveDate, include_shared: bool) -> Vec<YearBalanceLine> {
        let (start, end) = period::year_bounds(date);
        self.account_list(include_shared)
            .iter()
            .map(|account| {
                let start_balance = self.account_balance(account, start);
                let end_balance = self.account_balance(account, end);
                YearBalanceLine {
                    id: account.id,
                    name: account.name.clone(),
                    start_balance,
                    end_balance,
                    difference: end_balance - start_balance,
                }
            })
            .collect()
    }

    fn list_of_months(&self, since: NaiveDate) -> Vec<MonthListEntry> {
        let until = self.last_journal_date().unwrap_or(since);
        let mut entries: Vec<MonthListEntry> = period::months_between(since, until)
            .into_iter()
            .map(|month| MonthListEntry {
                year: month.year(),
                month: month.month(),
                label: month.format("%B %Y").to_string(),
            })
            .collect();
        entries.reverse();
        entries
    }

    fn list_of_years(&self, since: NaiveDate) -> Vec<i32> {
        let until = self.last_journal_date().unwrap_or(since);
        let mut years: Vec<i32> = (since.year()..=until.year()).collect();
        years.reverse();
        years
    }
}

/// Preference store over the dataset's preference map.
#[derive(Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, bool>,
}

impl MemoryPreferences {
    /// Create a store over the given preference map.
    #[must_use]
    pub fn new(values: HashMap<String, bool>) -> Self {
        Self { values }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_bool(&self, key: &str, default: bool) -> Preference {
        Preference {
            key: key.to_string(),
            data: self.values.get(key).copied().unwrap_or(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn dataset_fields_all_default() {
        let dataset: Dataset = serde_json::from_str("{}").unwrap();
        assert!(dataset.accounts.is_empty());
        assert!(dataset.journals.is_empty());
        assert!(dataset.preferences.is_empty());
    }

    #[test]
    fn balance_is_a_signed_running_sum() {
        let checking = Account::new(1, "Checking", AccountKind::Asset);
        let groceries = Account::new(2, "Groceries", AccountKind::Expense);
        let data = Dataset {
            accounts: vec![checking.clone(), groceries],
            journals: vec![
                TransactionJournal {
                    id: 1,
                    date: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
                    description: "Salary".into(),
                    amount: dec!(1000),
                    kind: JournalKind::Deposit,
                    from_account_id: 9,
                    to_account_id: 1,
                    budget_id: None,
                    category_id: None,
                    balanced: false,
                },
                TransactionJournal {
                    id: 2,
                    date: NaiveDate::from_ymd_opt(2015, 3, 10).unwrap(),
                    description: "Groceries".into(),
                    amount: dec!(75.25),
                    kind: JournalKind::Withdrawal,
                    from_account_id: 1,
                    to_account_id: 2,
                    budget_id: None,
                    category_id: None,
                    balanced: false,
                },
            ],
            ..Dataset::default()
        };
        let reports = MemoryReports::new(Arc::new(data));

        let day_before = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        let mid = NaiveDate::from_ymd_opt(2015, 3, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2015, 3, 31).unwrap();
        assert_eq!(reports.account_balance(&checking, day_before), Decimal::ZERO);
        assert_eq!(reports.account_balance(&checking, mid), dec!(1000));
        assert_eq!(reports.account_balance(&checking, end), dec!(924.75));
    }

    #[test]
    fn preferences_fall_back_to_default() {
        let store = MemoryPreferences::new(HashMap::new());
        assert!(!store.get_bool("showSharedReports", false).data);
        assert!(store.get_bool("showSharedReports", true).data);

        let store = MemoryPreferences::new(HashMap::from([("showSharedReports".to_string(), true)]));
        assert!(store.get_bool("showSharedReports", false).data);
    }
}
