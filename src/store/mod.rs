// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed record store. Each submodule owns one table; `ledger` holds the
//! operations that touch more than one.

pub mod budgets;
pub mod debts;
pub mod ledger;
pub mod transactions;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(crate) fn new_local_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn decimal_col(raw: &str, table: &str, id: i64) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' in {} #{}", raw, table, id))
}

pub(crate) fn date_col(raw: &str, table: &str, id: i64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in {} #{}", raw, table, id))
}
