// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FinanceError::InvalidTransactionType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_id: Option<i64>,
    pub synced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub month: String, // YYYY-MM
    pub synced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub interest_rate: Decimal, // annual percent
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub minimum_payment: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub current_balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    pub synced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

/// A transaction as entered, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub r#type: TransactionType,
    pub debt_id: Option<i64>,
}

impl NewTransaction {
    pub fn expense(date: NaiveDate, amount: Decimal, category: &str) -> Self {
        Self {
            date,
            amount,
            category: category.to_string(),
            description: None,
            tags: Vec::new(),
            r#type: TransactionType::Expense,
            debt_id: None,
        }
    }

    pub fn income(date: NaiveDate, amount: Decimal, category: &str) -> Self {
        Self {
            r#type: TransactionType::Income,
            ..Self::expense(date, amount, category)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn paying_debt(mut self, debt_id: i64) -> Self {
        self.debt_id = Some(debt_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub current_balance: Decimal,
    pub created_date: Option<NaiveDate>,
}

/// Partial update for a transaction. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub r#type: Option<TransactionType>,
    pub synced: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub month: Option<String>,
    pub synced: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtPatch {
    pub name: Option<String>,
    pub principal: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub current_balance: Option<Decimal>,
    pub created_date: Option<NaiveDate>,
    pub synced: Option<bool>,
}
