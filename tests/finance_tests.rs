// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::filter::DateRange;
use pocketbook::finance::{
    BudgetStatus, apply_payment, budget_progress, category_breakdown, debt_totals, payoff_months,
    payoff_progress, totals,
};
use pocketbook::models::{Budget, Debt, Transaction, TransactionType};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(date: &str, amount: &str, kind: TransactionType, category: &str) -> Transaction {
    Transaction {
        id: 0,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        amount: dec(amount),
        category: category.into(),
        description: None,
        tags: vec![],
        r#type: kind,
        debt_id: None,
        synced: false,
        local_id: None,
    }
}

fn budget(category: &str, amount: &str) -> Budget {
    Budget {
        id: 1,
        category: category.into(),
        amount: dec(amount),
        month: "2024-01".into(),
        synced: false,
        local_id: None,
    }
}

fn sample() -> Vec<Transaction> {
    use TransactionType::*;
    vec![
        tx("2024-01-01", "3000", Income, "Salary"),
        tx("2024-01-03", "45.10", Expense, "Food & Dining"),
        tx("2024-01-09", "1200", Expense, "Housing"),
        tx("2024-01-15", "250.5", Income, "Freelance"),
        tx("2024-01-20", "19.90", Expense, "Food & Dining"),
        tx("2024-02-02", "60", Expense, "Transportation"),
    ]
}

#[test]
fn totals_partition_by_type() {
    let t = totals(&sample());
    assert_eq!(t.income, dec("3250.5"));
    assert_eq!(t.expense, dec("1325"));
    assert_eq!(t.net, dec("1925.5"));
    assert_eq!((t.income_count, t.expense_count), (2, 4));
}

#[test]
fn net_matches_for_any_window() {
    let all = sample();
    for (s, e) in [
        (None, None),
        (Some("2024-01-05"), None),
        (None, Some("2024-01-15")),
        (Some("2024-01-10"), Some("2024-01-31")),
    ] {
        let p = |v: Option<&str>| v.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap());
        let window = DateRange::new(p(s), p(e)).apply(&all);
        let t = totals(&window);
        assert_eq!(t.income - t.expense, t.net);
    }
}

#[test]
fn breakdown_keeps_first_seen_order() {
    let cats = category_breakdown(&sample());
    let names: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Food & Dining", "Housing", "Transportation"]);
    assert_eq!(cats[0].amount, dec("65.00"));
    assert_eq!(cats[2].share_of(dec("120")), Some(dec("50")));
    assert_eq!(cats[2].share_of(Decimal::ZERO), None);
}

#[test]
fn budget_over_when_spend_exceeds_cap() {
    let txs = vec![
        tx("2024-01-02", "400", TransactionType::Expense, "Shopping"),
        tx("2024-01-12", "200", TransactionType::Expense, "Shopping"),
        tx("2024-01-12", "999", TransactionType::Income, "Shopping"),
        tx("2024-01-12", "50", TransactionType::Expense, "Housing"),
    ];
    let p = budget_progress(&budget("Shopping", "500"), &txs);
    assert_eq!(p.spent, dec("600"));
    assert_eq!(p.percentage, Some(dec("120")));
    assert_eq!(p.remaining, dec("-100"));
    assert_eq!(p.status, BudgetStatus::Over);
    assert_eq!(p.bar_fill(), dec("100"));
}

#[test]
fn budget_status_thresholds() {
    let b = budget("Utilities", "100");
    let at = |spent: &str| {
        budget_progress(
            &b,
            &[tx("2024-01-05", spent, TransactionType::Expense, "Utilities")],
        )
        .status
    };
    assert_eq!(at("80"), BudgetStatus::Good);
    assert_eq!(at("80.01"), BudgetStatus::Warning);
    assert_eq!(at("100"), BudgetStatus::Warning);
    assert_eq!(at("100.01"), BudgetStatus::Over);
}

#[test]
fn zero_budget_has_no_percentage() {
    let b = budget("Savings", "0");
    let none = budget_progress(&b, &[]);
    assert_eq!(none.percentage, None);
    assert_eq!(none.status, BudgetStatus::Good);
    let some = budget_progress(
        &b,
        &[tx("2024-01-05", "5", TransactionType::Expense, "Savings")],
    );
    assert_eq!(some.percentage, None);
    assert_eq!(some.status, BudgetStatus::Over);
    assert_eq!(some.remaining, dec("-5"));
}

#[test]
fn payoff_without_interest_is_simple_division() {
    assert_eq!(payoff_months(dec("1200"), dec("100"), Decimal::ZERO), Some(12));
    assert_eq!(payoff_months(dec("1250"), dec("100"), Decimal::ZERO), Some(13));
}

#[test]
fn payoff_with_interest_uses_amortization_period() {
    // 10,000 at 6% APR paying 200/mo clears in 58 payments.
    assert_eq!(payoff_months(dec("10000"), dec("200"), dec("6")), Some(58));
}

#[test]
fn payoff_not_computable_when_interest_outpaces_payment() {
    // 5000 at 24% accrues 100/mo, above the 50 payment.
    assert_eq!(payoff_months(dec("5000"), dec("50"), dec("24")), None);
    // Exactly covering interest never amortizes either.
    assert_eq!(payoff_months(dec("5000"), dec("100"), dec("24")), None);
}

#[test]
fn payoff_rejects_bad_inputs() {
    assert_eq!(payoff_months(dec("100"), Decimal::ZERO, dec("5")), None);
    assert_eq!(payoff_months(dec("100"), dec("-10"), dec("5")), None);
    assert_eq!(payoff_months(dec("100"), dec("10"), dec("-1")), None);
    assert_eq!(payoff_months(Decimal::ZERO, dec("10"), dec("5")), None);
}

#[test]
fn payoff_progress_and_zero_principal() {
    assert_eq!(payoff_progress(dec("1000"), dec("250")), Some(dec("75")));
    assert_eq!(payoff_progress(Decimal::ZERO, dec("10")), None);
}

#[test]
fn payments_floor_at_zero() {
    assert_eq!(apply_payment(dec("70"), dec("30")), dec("40"));
    assert_eq!(apply_payment(dec("10"), dec("30")), Decimal::ZERO);
}

#[test]
fn debt_totals_sum_balances_and_payments() {
    let mk = |bal: &str, min: &str| Debt {
        id: 0,
        name: "x".into(),
        principal: dec("1000"),
        interest_rate: dec("5"),
        minimum_payment: dec(min),
        current_balance: dec(bal),
        created_date: None,
        synced: false,
        local_id: None,
    };
    let t = debt_totals(&[mk("400", "25"), mk("100.50", "10")]);
    assert_eq!(t.total_balance, dec("500.50"));
    assert_eq!(t.total_minimum_payment, dec("35"));
    assert_eq!(t.count, 2);
}

#[test]
fn extreme_values_saturate_instead_of_panicking() {
    let big = vec![
        tx("2024-01-01", "0", TransactionType::Income, "Salary"),
        tx("2024-01-02", "0", TransactionType::Income, "Salary"),
    ]
    .into_iter()
    .map(|mut t| {
        t.amount = Decimal::MAX;
        t
    })
    .collect::<Vec<_>>();
    let t = totals(&big);
    assert_eq!(t.income, Decimal::MAX);
    assert_eq!(t.net, Decimal::MAX);

    let p = budget_progress(
        &budget("Shopping", "1"),
        &[tx("2024-01-05", "1000000000000000000000000000", TransactionType::Expense, "Shopping")],
    );
    assert_eq!(p.percentage, None);
    assert_eq!(p.status, BudgetStatus::Over);
    assert_eq!(p.bar_fill(), dec("100"));
    assert_eq!(payoff_progress(dec("0.0000000000000000000000000001"), Decimal::MAX), None);
}

#[test]
fn bar_fill_for_zero_budget_follows_status() {
    let b = budget("Savings", "0");
    assert_eq!(budget_progress(&b, &[]).bar_fill(), Decimal::ZERO);
    let half = budget_progress(
        &budget("Savings", "10"),
        &[tx("2024-01-05", "5", TransactionType::Expense, "Savings")],
    );
    assert_eq!(half.bar_fill(), dec("50"));
}
