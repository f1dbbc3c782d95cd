//! Categories, grouped aggregate rows and preferences.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A spending category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// One row of a grouped aggregate: a sum keyed by account or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTotal {
    /// Identifier of the account or category the row sums over.
    pub id: i64,
    /// Display name of the account or category.
    pub name: String,
    /// Summed amount. Expense-account rows are positive, category rows
    /// negative; see the grouping utilities for the ordering each uses.
    pub amount: Decimal,
}

impl GroupedTotal {
    /// Create a new row.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
        }
    }
}

/// A user preference as read by the report layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Preference key, e.g. `showSharedReports`.
    pub key: String,
    /// The stored value.
    pub data: bool,
}
