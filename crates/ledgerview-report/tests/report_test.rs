//! Integration tests for the dataset-backed report collaborators.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use ledgerview_core::{
    Account, AccountKind, Budget, BudgetLimit, Category, Decimal, JournalKind, TransactionJournal,
};
use ledgerview_report::{Dataset, MemoryReports, ReportHelper, ReportQuery};
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn journal(id: i64, day: NaiveDate, kind: JournalKind, from: i64, to: i64, amount: Decimal) -> TransactionJournal {
    TransactionJournal {
        id,
        date: day,
        description: format!("journal {id}"),
        amount,
        kind,
        from_account_id: from,
        to_account_id: to,
        budget_id: None,
        category_id: None,
        balanced: false,
    }
}

/// March 2015 fixture: checking (1) and a shared joint account (2), expense
/// accounts groceries (10) and rent (11), revenue employer (20), budgets
/// food (1) and housing (2), categories food (1) and utilities (2).
fn fixture() -> MemoryReports {
    let accounts = vec![
        Account::new(1, "Checking", AccountKind::Asset),
        Account::new(2, "Joint", AccountKind::Asset).with_shared(true),
        Account::new(10, "Groceries Inc", AccountKind::Expense),
        Account::new(11, "Landlord", AccountKind::Expense),
        Account::new(20, "Employer", AccountKind::Revenue),
    ];
    let journals = vec![
        journal(1, date(2015, 3, 1), JournalKind::Deposit, 20, 1, dec!(2000)),
        TransactionJournal {
            budget_id: Some(1),
            category_id: Some(1),
            ..journal(2, date(2015, 3, 5), JournalKind::Withdrawal, 1, 10, dec!(120.50))
        },
        TransactionJournal {
            budget_id: Some(2),
            category_id: Some(2),
            ..journal(3, date(2015, 3, 6), JournalKind::Withdrawal, 1, 11, dec!(800))
        },
        // unbudgeted withdrawal
        TransactionJournal {
            category_id: Some(1),
            ..journal(4, date(2015, 3, 12), JournalKind::Withdrawal, 1, 10, dec!(30))
        },
        // reconciled transfer into the joint account
        TransactionJournal {
            balanced: true,
            category_id: Some(2),
            ..journal(5, date(2015, 3, 15), JournalKind::Transfer, 1, 2, dec!(250))
        },
        // plain transfer, not reconciled
        journal(6, date(2015, 3, 20), JournalKind::Transfer, 1, 2, dec!(40)),
        // shared account spends for itself
        TransactionJournal {
            category_id: Some(2),
            ..journal(7, date(2015, 3, 22), JournalKind::Withdrawal, 2, 11, dec!(60))
        },
        // outside the month
        journal(8, date(2015, 4, 2), JournalKind::Withdrawal, 1, 10, dec!(999)),
        journal(9, date(2014, 11, 30), JournalKind::Deposit, 20, 1, dec!(500)),
    ];
    let data = Dataset {
        accounts,
        journals,
        budgets: vec![
            Budget { id: 1, name: "Food".into() },
            Budget { id: 2, name: "Housing".into() },
        ],
        budget_limits: vec![
            BudgetLimit { budget_id: 1, month: date(2015, 3, 1), amount: dec!(200) },
            BudgetLimit { budget_id: 2, month: date(2015, 3, 1), amount: dec!(800) },
        ],
        categories: vec![
            Category { id: 1, name: "Food".into() },
            Category { id: 2, name: "Utilities".into() },
        ],
        preferences: HashMap::new(),
    };
    MemoryReports::new(Arc::new(data))
}

const START: (i32, u32, u32) = (2015, 3, 1);
const END: (i32, u32, u32) = (2015, 3, 31);

fn march() -> (NaiveDate, NaiveDate) {
    (date(START.0, START.1, START.2), date(END.0, END.1, END.2))
}

#[test]
fn all_accounts_respects_range_and_shared_flag() {
    let reports = fixture();
    let (start, end) = march();

    let without_shared = reports.get_all_accounts(start, end, false);
    assert_eq!(without_shared.len(), 1);
    assert_eq!(without_shared[0].name, "Checking");

    let with_shared = reports.get_all_accounts(start, end, true);
    assert_eq!(with_shared.len(), 2);

    // a range with no activity yields no accounts
    let empty = reports.get_all_accounts(date(2013, 1, 1), date(2013, 1, 31), true);
    assert!(empty.is_empty());
}

#[test]
fn budget_summary_has_one_record_per_budget() {
    let reports = fixture();
    let (start, end) = march();
    let checking = reports.find_account(1).unwrap();

    let summary = reports.get_budget_summary(&checking, start, end);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].id, 1);
    assert_eq!(summary[0].amount, dec!(-120.50));
    assert_eq!(summary[1].id, 2);
    assert_eq!(summary[1].amount, dec!(-800));

    // the joint account never spent against a budget: all records zero
    let joint = reports.find_account(2).unwrap();
    let summary = reports.get_budget_summary(&joint, start, end);
    assert!(summary.iter().all(|r| r.amount == Decimal::ZERO));
}

#[test]
fn balanced_transfers_are_filtered_and_signed() {
    let reports = fixture();
    let (start, end) = march();
    let checking = reports.find_account(1).unwrap();
    let joint = reports.find_account(2).unwrap();

    let list = reports.balanced_transactions_list(&checking, start, end);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, 5);

    assert_eq!(reports.balanced_transactions_sum(&checking, start, end), dec!(-250));
    assert_eq!(reports.balanced_transactions_sum(&joint, start, end), dec!(250));
}

#[test]
fn transactions_without_budget_exclude_deposits() {
    let reports = fixture();
    let (start, end) = march();
    let checking = reports.find_account(1).unwrap();

    let set = reports.get_transactions_without_budget(&checking, start, end);
    let ids: Vec<i64> = set.iter().map(|j| j.id).collect();
    // the unbudgeted withdrawal and both transfers; never the deposit
    assert_eq!(ids, vec![4, 5, 6]);
}

#[test]
fn income_is_deposits_in_range() {
    let reports = fixture();
    let (start, end) = march();

    let income = reports.income_by_period(start, end, false);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].amount, dec!(2000));
}

#[test]
fn expense_account_grouping_sums_per_destination() {
    let reports = fixture();
    let (start, end) = march();

    let rows = reports.journals_by_expense_account(start, end, false);
    assert_eq!(rows.len(), 2);
    let groceries = rows.iter().find(|r| r.id == 10).unwrap();
    assert_eq!(groceries.amount, dec!(150.50));
    let rent = rows.iter().find(|r| r.id == 11).unwrap();
    assert_eq!(rent.amount, dec!(800));

    // including shared accounts picks up the joint account's rent payment
    let rows = reports.journals_by_expense_account(start, end, true);
    let rent = rows.iter().find(|r| r.id == 11).unwrap();
    assert_eq!(rent.amount, dec!(860));
}

#[test]
fn category_sums_are_negative_and_exclude_shared_spending() {
    let reports = fixture();
    let (start, end) = march();

    let categories = reports.journals_by_category(start, end);
    let food = categories.iter().find(|r| r.id == 1).unwrap();
    assert_eq!(food.amount, dec!(-150.50));
    let utilities = categories.iter().find(|r| r.id == 2).unwrap();
    // only the checking account's rent; the joint account's spending is out
    assert_eq!(utilities.amount, dec!(-800));

    let shared = reports.shared_expenses_by_category(start, end);
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].id, 2);
    assert_eq!(shared[0].amount, dec!(-250));
}

#[test]
fn budgets_for_month_rolls_up_spending_and_allocation() {
    let reports = fixture();
    let report = reports.get_budgets_for_month(date(2015, 3, 14), false);

    assert_eq!(report.rows.len(), 2);
    let food = report.rows.iter().find(|r| r.id == 1).unwrap();
    assert_eq!(food.budgeted, dec!(200));
    assert_eq!(food.spent, dec!(-120.50));
    assert_eq!(food.left, dec!(79.50));
    let housing = report.rows.iter().find(|r| r.id == 2).unwrap();
    assert_eq!(housing.left, Decimal::ZERO);

    // journal 4 is the only unbudgeted withdrawal from a visible account
    assert_eq!(report.no_budget_spent, dec!(-30));

    // with shared accounts visible the joint rent payment joins the rest
    let report = reports.get_budgets_for_month(date(2015, 3, 14), true);
    assert_eq!(report.no_budget_spent, dec!(-90));
}

#[test]
fn year_balance_report_brackets_the_year() {
    let reports = fixture();
    let lines = reports.year_balance_report(date(2015, 6, 1), false);
    assert_eq!(lines.len(), 1);
    let checking = &lines[0];
    assert_eq!(checking.start_balance, dec!(500));
    assert_eq!(checking.end_balance, dec!(500) + dec!(2000) - dec!(120.50) - dec!(800) - dec!(30) - dec!(250) - dec!(40) - dec!(999));
    assert_eq!(checking.difference, checking.end_balance - checking.start_balance);
}

#[test]
fn navigation_lists_run_from_since_to_latest_journal() {
    let reports = fixture();
    let months = reports.list_of_months(date(2014, 11, 30));
    // Nov 2014 .. Apr 2015, newest first
    assert_eq!(months.len(), 6);
    assert_eq!(months[0].label, "April 2015");
    assert_eq!((months[0].year, months[0].month), (2015, 4));
    assert_eq!(months[5].label, "November 2014");

    let years = reports.list_of_years(date(2014, 11, 30));
    assert_eq!(years, vec![2015, 2014]);

    assert_eq!(reports.first_journal_date(), Some(date(2014, 11, 30)));
}

#[test]
fn dataset_loads_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "accounts": [{{"id": 1, "name": "Checking", "kind": "Asset"}}],
            "journals": [],
            "preferences": {{"showSharedReports": true}}
        }}"#
    )
    .unwrap();

    let dataset = Dataset::from_path(file.path()).unwrap();
    assert_eq!(dataset.accounts.len(), 1);
    assert_eq!(dataset.accounts[0].kind, AccountKind::Asset);
    assert_eq!(dataset.preferences.get("showSharedReports"), Some(&true));
    assert!(dataset.budgets.is_empty());
}

#[test]
fn dataset_load_rejects_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(Dataset::from_path(file.path()).is_err());
}
