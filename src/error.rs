// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinanceError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error("Invalid transaction type '{0}', expected income|expense")]
    InvalidTransactionType(String),
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: &'static str },
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

impl FinanceError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        FinanceError::NotFound { kind, id }
    }
}
