//! Account type and classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What role an account plays in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// An account the user owns (checking, savings, cash).
    Asset,
    /// A destination money is spent to (groceries, rent).
    Expense,
    /// A source money comes in from (salary, interest).
    Revenue,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Expense => write!(f, "expense"),
            Self::Revenue => write!(f, "revenue"),
        }
    }
}

/// A financial account.
///
/// Start/end balances and their difference are derived per report and live in
/// the view models, not here. `shared` marks joint accounts that are excluded
/// from aggregates unless the shared-reports preference is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Role of the account.
    pub kind: AccountKind,
    /// Whether this is a shared/joint account.
    #[serde(default)]
    pub shared: bool,
}

impl Account {
    /// Create a new account.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            shared: false,
        }
    }

    /// Mark the account as shared.
    #[must_use]
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }
}
