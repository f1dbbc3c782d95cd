//! Core types for ledgerview
//!
//! This crate provides the entities the report layer aggregates over:
//!
//! - [`Account`] - A financial account (asset, expense or revenue)
//! - [`TransactionJournal`] - A recorded movement of money between accounts
//! - [`Budget`] / [`BudgetLimit`] / [`BudgetRecord`] - Budget envelopes and
//!   per-period spending against them
//! - [`Category`] - A free-form spending category
//! - [`GroupedTotal`] - One row of an aggregate keyed by account or category
//! - [`Preference`] - A user setting read by the report layer
//!
//! All amounts are [`rust_decimal::Decimal`]; all dates are
//! [`chrono::NaiveDate`]. The report layer never mutates these entities.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod budget;
pub mod category;
pub mod journal;

pub use account::{Account, AccountKind};
pub use budget::{Budget, BudgetLimit, BudgetRecord};
pub use category::{Category, GroupedTotal, Preference};
pub use journal::{JournalKind, TransactionJournal};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
