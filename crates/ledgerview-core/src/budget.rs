//! Budget envelope types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget envelope money can be allocated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Stable identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// The amount allocated to a budget for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// Budget the limit applies to.
    pub budget_id: i64,
    /// First day of the month the limit covers.
    pub month: NaiveDate,
    /// Allocated amount.
    pub amount: Decimal,
}

/// Per-account, per-period spending against one budget.
///
/// This is the record shape the budget report keys by budget id; `amount`
/// is the account's spending in the period (negative), zero when the
/// account did not touch the budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Budget identifier.
    pub id: i64,
    /// Budget name.
    pub name: String,
    /// Spending against the budget in the period.
    pub amount: Decimal,
}

impl BudgetRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
        }
    }
}
