// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures shown on the dashboard, budget and debt views. Everything
//! here is a pure function of the snapshot it is given.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::{Budget, Debt, Transaction, TransactionType};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const WARNING_PERCENT: i64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let mut t = Totals::default();
    for tx in txs {
        match tx.r#type {
            TransactionType::Income => {
                t.income = t.income.saturating_add(tx.amount);
                t.income_count += 1;
            }
            TransactionType::Expense => {
                t.expense = t.expense.saturating_add(tx.amount);
                t.expense_count += 1;
            }
        }
    }
    t.net = t.income.saturating_sub(t.expense);
    t
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
}

impl CategorySpend {
    /// Percentage of `total` this category accounts for. `None` for a zero
    /// total or a share too large to represent.
    pub fn share_of(&self, total: Decimal) -> Option<Decimal> {
        self.amount.checked_div(total)?.checked_mul(HUNDRED)
    }
}

/// Expense totals per category, in order of first appearance.
pub fn category_breakdown(txs: &[Transaction]) -> Vec<CategorySpend> {
    let mut out: Vec<CategorySpend> = Vec::new();
    for tx in txs.iter().filter(|t| t.r#type == TransactionType::Expense) {
        match out.iter_mut().find(|c| c.category == tx.category) {
            Some(existing) => existing.amount = existing.amount.saturating_add(tx.amount),
            None => out.push(CategorySpend {
                category: tx.category.clone(),
                amount: tx.amount,
            }),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Good => "good",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Over => "over",
        }
    }

    fn classify(percentage: Decimal) -> Self {
        if percentage > HUNDRED {
            BudgetStatus::Over
        } else if percentage > Decimal::from(WARNING_PERCENT) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Good
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub spent: Decimal,
    /// `None` when the budget amount is zero or the ratio overflows.
    pub percentage: Option<Decimal>,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    /// Percentage clamped to 0..=100 for progress bars. Without a percentage the
    /// bar is full when over budget and empty otherwise.
    pub fn bar_fill(&self) -> Decimal {
        match self.percentage {
            Some(p) => p.clamp(Decimal::ZERO, HUNDRED),
            None if self.status == BudgetStatus::Over => HUNDRED,
            None => Decimal::ZERO,
        }
    }
}

/// Spend against `budget` from the expense transactions in `txs` that share its
/// category. The caller decides the window `txs` covers.
pub fn budget_progress(budget: &Budget, txs: &[Transaction]) -> BudgetProgress {
    let spent = txs
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense && t.category == budget.category)
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));
    let percentage = spent
        .checked_div(budget.amount)
        .and_then(|ratio| ratio.checked_mul(HUNDRED));
    let status = match percentage {
        Some(p) => BudgetStatus::classify(p),
        // Zero budget, or spend so far past it the ratio does not fit.
        None if spent > Decimal::ZERO => BudgetStatus::Over,
        None => BudgetStatus::Good,
    };
    BudgetProgress {
        spent,
        percentage,
        remaining: budget.amount.saturating_sub(spent),
        status,
    }
}

/// Number of fixed monthly payments needed to clear `balance` at
/// `annual_rate` percent, compounded monthly.
///
/// Returns `None` when the payment is not positive, the rate is negative, or
/// the payment never outpaces accruing interest (`i * balance >= payment`).
pub fn payoff_months(balance: Decimal, payment: Decimal, annual_rate: Decimal) -> Option<u32> {
    if payment <= Decimal::ZERO || annual_rate < Decimal::ZERO {
        return None;
    }
    let b = balance.to_f64()?;
    let p = payment.to_f64()?;
    let i = annual_rate.to_f64()? / 100.0 / 12.0;

    let months = if i == 0.0 {
        (b / p).ceil()
    } else {
        (-(1.0 - i * b / p).ln() / (1.0 + i).ln()).ceil()
    };
    if !months.is_finite() || months <= 0.0 || months > f64::from(u32::MAX) {
        return None;
    }
    Some(months as u32)
}

pub fn debt_payoff_months(debt: &Debt) -> Option<u32> {
    payoff_months(
        debt.current_balance,
        debt.minimum_payment,
        debt.interest_rate,
    )
}

/// Share of the original principal already repaid, as a percentage.
pub fn payoff_progress(principal: Decimal, balance: Decimal) -> Option<Decimal> {
    principal
        .saturating_sub(balance)
        .checked_div(principal)?
        .checked_mul(HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DebtTotals {
    pub total_balance: Decimal,
    pub total_minimum_payment: Decimal,
    pub count: usize,
}

pub fn debt_totals(debts: &[Debt]) -> DebtTotals {
    debts.iter().fold(DebtTotals::default(), |mut acc, d| {
        acc.total_balance = acc.total_balance.saturating_add(d.current_balance);
        acc.total_minimum_payment = acc.total_minimum_payment.saturating_add(d.minimum_payment);
        acc.count += 1;
        acc
    })
}

/// Balance after applying a payment; never below zero.
pub fn apply_payment(balance: Decimal, payment: Decimal) -> Decimal {
    balance.saturating_sub(payment).max(Decimal::ZERO)
}

/// Balance after reversing a payment. Not clamped at zero.
pub fn reverse_payment(balance: Decimal, payment: Decimal) -> Decimal {
    balance.saturating_add(payment)
}
