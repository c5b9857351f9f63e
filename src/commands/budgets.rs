// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::categories::EXPENSE_CATEGORIES;
use crate::commands::range_from;
use crate::filter::DateRange;
use crate::finance::{BudgetProgress, budget_progress};
use crate::models::{Budget, NewBudget, Transaction};
use crate::settings::currency_symbol;
use crate::store::{budgets, transactions};
use crate::utils::{
    fmt_money, maybe_print_json, month_end, month_of, month_start, parse_month, parse_positive,
    pretty_table, today,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("progress", sub)) => progress(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(month_of(today())),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_positive(sub.get_one::<String>("amount").unwrap())?;
    if !EXPENSE_CATEGORIES.contains(&category.as_str()) {
        tracing::warn!(category = %category, "budget category is not an expense category");
    }
    let id = budgets::add(
        conn,
        &NewBudget {
            category: category.clone(),
            amount,
            month: month.clone(),
        },
    )?;
    println!(
        "Budget #{} set for {} / {} = {}",
        id,
        month,
        category,
        fmt_money(&amount, &currency_symbol(conn)?)
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    budgets::delete(conn, id)?;
    println!("Removed budget #{}", id);
    Ok(())
}

/// Budgets for `--month`, or every budget whose month starts inside the range.
pub fn list_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Budget>> {
    let range = range_from(sub)?;
    let all = match sub.get_one::<String>("month") {
        Some(m) => budgets::by_month(conn, &parse_month(m)?)?,
        None => budgets::list_all(conn)?,
    };
    Ok(range.apply(&all))
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = list_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let symbol = currency_symbol(conn)?;
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.month.clone(),
                    b.category.clone(),
                    fmt_money(&b.amount, &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Category", "Budget"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ProgressRow {
    pub id: i64,
    pub month: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(flatten)]
    pub progress: BudgetProgress,
}

/// Progress for each budget against the transactions it is given.
pub fn progress_rows(budgets: &[Budget], txs: &[Transaction]) -> Vec<ProgressRow> {
    budgets
        .iter()
        .map(|b| ProgressRow {
            id: b.id,
            month: b.month.clone(),
            category: b.category.clone(),
            amount: b.amount,
            progress: budget_progress(b, txs),
        })
        .collect()
}

/// Budgets of `month` measured against that month's transactions.
pub fn month_progress(conn: &Connection, month: &str) -> Result<Vec<ProgressRow>> {
    let range = DateRange::new(Some(month_start(month)?), Some(month_end(month)?));
    let txs = transactions::in_range(conn, &range)?;
    Ok(progress_rows(&budgets::by_month(conn, month)?, &txs))
}

const BAR_WIDTH: u32 = 10;

/// Ten-cell text bar filled to the clamped percentage.
fn progress_bar(p: &BudgetProgress) -> String {
    let filled = (p.bar_fill() / Decimal::from(BAR_WIDTH))
        .round()
        .to_u32()
        .unwrap_or(BAR_WIDTH)
        .min(BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled as usize),
        "░".repeat((BAR_WIDTH - filled) as usize)
    )
}

pub fn render_progress(rows: &[ProgressRow], symbol: &str) -> comfy_table::Table {
    let data = rows
        .iter()
        .map(|r| {
            let p = &r.progress;
            let pct = p
                .percentage
                .map(|v| format!("{:.1}%", v))
                .unwrap_or_else(|| "N/A".to_string());
            let left = if p.remaining >= Decimal::ZERO {
                format!("{} left", fmt_money(&p.remaining, symbol))
            } else {
                format!("{} over", fmt_money(&p.remaining.abs(), symbol))
            };
            vec![
                r.category.clone(),
                format!(
                    "{} / {}",
                    fmt_money(&p.spent, symbol),
                    fmt_money(&r.amount, symbol)
                ),
                progress_bar(p),
                pct,
                left,
                p.status.as_str().to_string(),
            ]
        })
        .collect();
    pretty_table(&["Category", "Spent / Budget", "Progress", "Used", "Remaining", "Status"], data)
}

fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let rows = month_progress(conn, &month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No budgets set for {}", month);
        return Ok(());
    }
    println!("{}", render_progress(&rows, &currency_symbol(conn)?));
    Ok(())
}
