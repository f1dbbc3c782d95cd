//! View-model assembly.
//!
//! Pure functions between the report collaborators and the templates: each
//! takes the already-validated report date, fans out to the query/helper,
//! and shapes the result. Handlers stay transport glue; everything here is
//! testable without a server.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ledgerview_core::{BudgetRecord, Decimal};
use ledgerview_report::{grouping, period, ReportHelper, ReportQuery};

use crate::models::{
    AccountBudgetBlock, AccountSummaryLine, BudgetView, IndexView, JournalLine, MonthView,
    YearView,
};

/// Expense and category lists are cut to this many rows.
pub const REPORT_LIST_LIMIT: usize = 10;

/// Assemble the report navigation index.
pub fn index_view(query: &dyn ReportQuery, helper: &dyn ReportHelper) -> IndexView {
    match query.first_journal_date() {
        Some(since) => IndexView {
            months: helper.list_of_months(since),
            years: helper.list_of_years(since),
        },
        None => IndexView {
            months: Vec::new(),
            years: Vec::new(),
        },
    }
}

/// Assemble the monthly report for the month containing `date`.
pub fn month_view(
    query: &dyn ReportQuery,
    helper: &dyn ReportHelper,
    date: NaiveDate,
    include_shared: bool,
) -> MonthView {
    let (start, end) = period::month_bounds(date);

    let income = query.income_by_period(start, end, include_shared);
    let income_total: Decimal = income.iter().map(|j| j.amount).sum();
    let income: Vec<JournalLine> = income.into_iter().map(JournalLine::from).collect();

    let expenses = grouping::limit(
        grouping::sort_descending(grouping::key_by_id(
            query.journals_by_expense_account(start, end, include_shared),
        )),
        REPORT_LIST_LIMIT,
    );

    let budgets = helper.get_budgets_for_month(date, include_shared);

    // Shared spending only joins the category list when shared accounts are
    // hidden from the rest of the report.
    let categories = grouping::key_by_id(query.journals_by_category(start, end));
    let merged = if include_shared {
        categories
    } else {
        grouping::merge(
            categories,
            grouping::key_by_id(query.shared_expenses_by_category(start, end)),
        )
    };
    let categories = grouping::limit(
        grouping::sort_most_negative_first(merged),
        REPORT_LIST_LIMIT,
    );

    let accounts = query
        .account_list(include_shared)
        .iter()
        .map(|account| {
            let start_balance = query.account_balance(account, start);
            let end_balance = query.account_balance(account, end);
            AccountSummaryLine {
                id: account.id,
                name: account.name.clone(),
                start_balance,
                end_balance,
                difference: end_balance - start_balance,
            }
        })
        .collect();

    MonthView {
        subtitle: format!("Report for {}", date.format("%B %Y")),
        income,
        income_total,
        expenses,
        budgets,
        categories,
        accounts,
    }
}

/// Assemble the budget report for the month containing `date`.
pub fn budget_view(
    query: &dyn ReportQuery,
    helper: &dyn ReportHelper,
    date: NaiveDate,
    include_shared: bool,
) -> BudgetView {
    let (start, end) = period::month_bounds(date);
    // The account lookup runs on a window widened by one day at the start;
    // the per-account summaries below use the unwidened month.
    let day_early = start.pred_opt().unwrap_or(start);
    let accounts = query.get_all_accounts(day_early, end, include_shared);

    let accounts = accounts
        .iter()
        .map(|account| {
            let records = query.get_budget_summary(account, start, end);
            let hide = records.iter().all(|r| r.amount == Decimal::ZERO);
            let budgets: BTreeMap<i64, BudgetRecord> =
                records.into_iter().map(|r| (r.id, r)).collect();
            AccountBudgetBlock {
                id: account.id,
                name: account.name.clone(),
                hide,
                budgets,
                balanced_amount: query.balanced_transactions_sum(account, start, end),
            }
        })
        .collect();

    BudgetView {
        subtitle: format!("Budget report for {}", date.format("%B %Y")),
        date,
        day_early,
        accounts,
        budgets: helper.get_budgets_for_month(date, include_shared),
    }
}

/// Assemble the yearly report for the year containing `date`.
pub fn year_view(
    query: &dyn ReportQuery,
    helper: &dyn ReportHelper,
    date: NaiveDate,
    include_shared: bool,
) -> YearView {
    let (start, end) = period::year_bounds(date);
    YearView {
        year: date.year(),
        balances: helper.year_balance_report(date, include_shared),
        grouped_incomes: query.journals_by_revenue_account(start, end, include_shared),
        grouped_expenses: query.journals_by_expense_account(start, end, include_shared),
    }
}

/// The account's reconciled transfers for the month containing `date`.
pub fn balanced_transfers_list(
    query: &dyn ReportQuery,
    account_id: i64,
    date: NaiveDate,
) -> Vec<JournalLine> {
    let (start, end) = period::month_bounds(date);
    match query.find_account(account_id) {
        Some(account) => query
            .balanced_transactions_list(&account, start, end)
            .into_iter()
            .map(JournalLine::from)
            .collect(),
        None => Vec::new(),
    }
}

/// The account's unbudgeted journals for the month containing `date`.
pub fn no_budget_list(
    query: &dyn ReportQuery,
    account_id: i64,
    date: NaiveDate,
) -> Vec<JournalLine> {
    let (start, end) = period::month_bounds(date);
    match query.find_account(account_id) {
        Some(account) => query
            .get_transactions_without_budget(&account, start, end)
            .into_iter()
            .map(JournalLine::from)
            .collect(),
        None => Vec::new(),
    }
}

/// The account's unbudgeted journals that also carry no balance relation.
pub fn left_unbalanced_list(
    query: &dyn ReportQuery,
    account_id: i64,
    date: NaiveDate,
) -> Vec<JournalLine> {
    let (start, end) = period::month_bounds(date);
    match query.find_account(account_id) {
        Some(account) => query
            .get_transactions_without_budget(&account, start, end)
            .into_iter()
            .filter(|j| !j.balanced)
            .map(JournalLine::from)
            .collect(),
        None => Vec::new(),
    }
}
