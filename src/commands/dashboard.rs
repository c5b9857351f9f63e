// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::budgets::{ProgressRow, progress_rows, render_progress};
use crate::commands::range_from;
use crate::filter::DateRange;
use crate::finance::{CategorySpend, DebtTotals, Totals, category_breakdown, debt_totals, totals};
use crate::settings::currency_symbol;
use crate::store::{budgets, debts, transactions};
use crate::utils::{fmt_money, maybe_print_json, month_end, month_of, month_start, pretty_table, today};

/// Budgets shown on the dashboard; the full list lives under `budget progress`.
const DASHBOARD_BUDGETS: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub start: Option<String>,
    pub end: Option<String>,
    pub totals: Totals,
    pub categories: Vec<CategorySpend>,
    pub budgets: Vec<ProgressRow>,
    pub debt: DebtTotals,
}

pub fn current_month_range() -> Result<DateRange> {
    let month = month_of(today());
    Ok(DateRange::new(
        Some(month_start(&month)?),
        Some(month_end(&month)?),
    ))
}

/// Figures for the window `range`. Budget progress covers this month's budgets,
/// measured against the windowed transactions.
pub fn build(conn: &Connection, range: &DateRange, month: &str) -> Result<Dashboard> {
    let txs = range.apply(&transactions::list_all(conn)?);
    let month_budgets: Vec<_> = budgets::by_month(conn, month)?
        .into_iter()
        .take(DASHBOARD_BUDGETS)
        .collect();
    Ok(Dashboard {
        start: range.start.map(|d| d.to_string()),
        end: range.end.map(|d| d.to_string()),
        totals: totals(&txs),
        categories: category_breakdown(&txs),
        budgets: progress_rows(&month_budgets, &txs),
        debt: debt_totals(&debts::list_all(conn)?),
    })
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range = if sub.get_flag("all") {
        DateRange::unbounded()
    } else {
        let given = range_from(sub)?;
        if given.is_unbounded() {
            current_month_range()?
        } else {
            given
        }
    };
    let board = build(conn, &range, &month_of(today()))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &board)? {
        return Ok(());
    }
    let symbol = currency_symbol(conn)?;
    let t = &board.totals;
    let cashflow = if t.net >= rust_decimal::Decimal::ZERO {
        "positive cashflow"
    } else {
        "negative cashflow"
    };
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expenses", "Net Income", "Total Debt"],
            vec![
                vec![
                    fmt_money(&t.income, &symbol),
                    fmt_money(&t.expense, &symbol),
                    fmt_money(&t.net, &symbol),
                    fmt_money(&board.debt.total_balance, &symbol),
                ],
                vec![
                    format!("{} transactions", t.income_count),
                    format!("{} transactions", t.expense_count),
                    cashflow.to_string(),
                    format!("{} active debts", board.debt.count),
                ],
            ],
        )
    );

    if board.categories.is_empty() {
        println!("No expense data for this period");
    } else {
        let rows = board
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.amount, &symbol),
                    c.share_of(t.expense)
                        .map(|s| format!("{:.0}%", s))
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }

    if board.budgets.is_empty() {
        println!("No budgets set for this month");
    } else {
        println!("{}", render_progress(&board.budgets, &symbol));
    }
    Ok(())
}
