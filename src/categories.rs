// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Suggested category vocabulary. Storage accepts any label; these lists only
//! drive prompts, listings and the unknown-category warning.

use crate::models::TransactionType;
use once_cell::sync::Lazy;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Housing",
    "Transportation",
    "Food & Dining",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Education",
    "Insurance",
    "Debt Payments",
    "Savings",
    "Other",
];

pub const INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investment", "Bonus", "Gift", "Other"];

/// Category used for payments recorded through `debt pay`.
pub const DEBT_PAYMENT_CATEGORY: &str = "Debt Payments";

/// Expense categories followed by income categories. "Other" appears twice.
pub static ALL_CATEGORIES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    EXPENSE_CATEGORIES
        .iter()
        .chain(INCOME_CATEGORIES.iter())
        .copied()
        .collect()
});

pub fn for_type(t: TransactionType) -> &'static [&'static str] {
    match t {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

pub fn is_known(t: TransactionType, name: &str) -> bool {
    for_type(t).contains(&name)
}
