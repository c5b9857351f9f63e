// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories::DEBT_PAYMENT_CATEGORY;
use crate::commands::range_from;
use crate::finance::{debt_payoff_months, debt_totals, payoff_progress};
use crate::models::{Debt, NewDebt, NewTransaction};
use crate::settings::currency_symbol;
use crate::store::{debts, ledger};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, parse_decimal, parse_positive,
    pretty_table, today,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let principal = parse_positive(sub.get_one::<String>("principal").unwrap())?;
    let interest_rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    if interest_rate < Decimal::ZERO {
        return Err(anyhow!("Interest rate must not be negative"));
    }
    let minimum_payment = parse_positive(sub.get_one::<String>("min_payment").unwrap())?;
    let current_balance = match sub.get_one::<String>("balance") {
        Some(b) => parse_amount(b)?,
        None => principal,
    };
    let created_date = match sub.get_one::<String>("created") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let id = debts::add(
        conn,
        &NewDebt {
            name: name.clone(),
            principal,
            interest_rate,
            minimum_payment,
            current_balance,
            created_date: Some(created_date),
        },
    )?;
    println!("Added debt #{} '{}'", id, name);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    debts::delete(conn, id)?;
    println!("Removed debt #{}", id);
    Ok(())
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let debt = debts::get(conn, id)?.ok_or_else(|| anyhow!("Debt #{} not found", id))?;
    let amount = parse_positive(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_else(|| format!("Payment to {}", debt.name));
    let new = NewTransaction::expense(date, amount, DEBT_PAYMENT_CATEGORY)
        .with_description(&description)
        .paying_debt(id);
    let tx_id = ledger::record_transaction(conn, &new)?;
    let after = debts::get(conn, id)?.map(|d| d.current_balance).unwrap_or_default();
    let symbol = currency_symbol(conn)?;
    println!(
        "Recorded payment #{} of {} to '{}'; balance now {}",
        tx_id,
        fmt_money(&amount, &symbol),
        debt.name,
        fmt_money(&after, &symbol)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DebtRow {
    pub id: i64,
    pub name: String,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub current_balance: Decimal,
    pub payoff_months: Option<u32>,
    pub progress: Option<Decimal>,
}

impl From<&Debt> for DebtRow {
    fn from(d: &Debt) -> Self {
        DebtRow {
            id: d.id,
            name: d.name.clone(),
            principal: d.principal,
            interest_rate: d.interest_rate,
            minimum_payment: d.minimum_payment,
            current_balance: d.current_balance,
            payoff_months: debt_payoff_months(d),
            progress: payoff_progress(d.principal, d.current_balance),
        }
    }
}

/// "N months", "paid off" for a cleared balance, otherwise "N/A".
pub fn payoff_label(row: &DebtRow) -> String {
    match row.payoff_months {
        Some(1) => "1 month".to_string(),
        Some(n) => format!("{} months", n),
        None if row.current_balance.is_zero() => "paid off".to_string(),
        None => "N/A".to_string(),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range = range_from(sub)?;
    let all = range.apply(&debts::list_all(conn)?);
    let rows: Vec<DebtRow> = all.iter().map(DebtRow::from).collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No debts tracked");
        return Ok(());
    }
    let symbol = currency_symbol(conn)?;
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                format!("{:.2}%", r.interest_rate),
                fmt_money(&r.principal, &symbol),
                fmt_money(&r.current_balance, &symbol),
                fmt_money(&r.minimum_payment, &symbol),
                payoff_label(r),
                r.progress
                    .map(|p| format!("{:.1}% paid off", p))
                    .unwrap_or_else(|| "N/A".to_string()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "APR", "Original", "Balance", "Min. Payment", "Payoff", "Progress"],
            data
        )
    );
    let totals = debt_totals(&all);
    println!(
        "Total debt {} across {} debts; minimum payments {}/mo",
        fmt_money(&totals.total_balance, &symbol),
        totals.count,
        fmt_money(&totals.total_minimum_payment, &symbol)
    );
    Ok(())
}
