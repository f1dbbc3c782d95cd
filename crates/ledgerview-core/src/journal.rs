//! Transaction journal type.
//!
//! A [`TransactionJournal`] records one movement of money between two
//! accounts, optionally tagged with a budget, a category, and the balance
//! relation used by the budget report to recognize reconciled transfers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The direction of a journal relative to the user's asset accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JournalKind {
    /// Money coming in from a revenue account.
    Deposit,
    /// Money going out to an expense account.
    Withdrawal,
    /// Money moving between two asset accounts.
    Transfer,
}

/// A recorded financial transaction.
///
/// `amount` is always positive; the sign an account observes follows from
/// whether it is the source or the destination (see [`Self::signed_amount`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionJournal {
    /// Stable identifier.
    pub id: i64,
    /// Date the transaction happened.
    pub date: NaiveDate,
    /// Human description.
    pub description: String,
    /// Positive amount moved.
    pub amount: Decimal,
    /// Direction of the movement.
    pub kind: JournalKind,
    /// Source account.
    pub from_account_id: i64,
    /// Destination account.
    pub to_account_id: i64,
    /// Budget the journal counts against, if any.
    #[serde(default)]
    pub budget_id: Option<i64>,
    /// Category the journal is filed under, if any.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Whether the journal carries the balance relation, i.e. is a transfer
    /// reconciled against a budget.
    #[serde(default)]
    pub balanced: bool,
}

impl TransactionJournal {
    /// Whether the journal touches the given account on either side.
    #[must_use]
    pub fn touches(&self, account_id: i64) -> bool {
        self.from_account_id == account_id || self.to_account_id == account_id
    }

    /// The amount as seen from one account: credited amounts are positive,
    /// debited amounts negative. Zero if the account is not involved.
    #[must_use]
    pub fn signed_amount(&self, account_id: i64) -> Decimal {
        if self.to_account_id == account_id {
            self.amount
        } else if self.from_account_id == account_id {
            -self.amount
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn journal(from: i64, to: i64, amount: Decimal) -> TransactionJournal {
        TransactionJournal {
            id: 1,
            date: NaiveDate::from_ymd_opt(2015, 3, 14).unwrap(),
            description: "Groceries".into(),
            amount,
            kind: JournalKind::Withdrawal,
            from_account_id: from,
            to_account_id: to,
            budget_id: None,
            category_id: None,
            balanced: false,
        }
    }

    #[test]
    fn signed_amount_follows_direction() {
        let j = journal(1, 2, dec!(25.50));
        assert_eq!(j.signed_amount(1), dec!(-25.50));
        assert_eq!(j.signed_amount(2), dec!(25.50));
        assert_eq!(j.signed_amount(3), Decimal::ZERO);
    }

    #[test]
    fn touches_either_side() {
        let j = journal(1, 2, dec!(10));
        assert!(j.touches(1));
        assert!(j.touches(2));
        assert!(!j.touches(3));
    }
}
