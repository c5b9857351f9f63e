// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::categories;
use crate::commands::range_from;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::settings::currency_symbol;
use crate::store::{debts, ledger, transactions};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, parse_tags, pretty_table, today,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds a transaction from `tx add` arguments without touching the store.
pub fn new_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind: TransactionType = sub
        .get_one::<String>("type")
        .map(|s| s.as_str())
        .unwrap_or("expense")
        .parse()?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let tags = sub
        .get_one::<String>("tags")
        .map(|s| parse_tags(s))
        .unwrap_or_default();
    let debt_id = sub.get_one::<i64>("debt").copied();
    if debt_id.is_some() && kind == TransactionType::Income {
        anyhow::bail!("Only expenses can pay down a debt");
    }
    Ok(NewTransaction {
        date,
        amount,
        category,
        description,
        tags,
        r#type: kind,
        debt_id,
    })
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_from_args(sub)?;
    if !categories::is_known(new.r#type, &new.category) {
        tracing::warn!(category = %new.category, kind = %new.r#type, "category is not in the suggested list");
    }
    if let Some(debt_id) = new.debt_id {
        if debts::get(conn, debt_id)?.is_none() {
            anyhow::bail!("Debt #{} not found", debt_id);
        }
    }
    let id = ledger::record_transaction(conn, &new)?;
    let symbol = currency_symbol(conn)?;
    println!(
        "Recorded {} #{} of {} on {} ({})",
        new.r#type,
        id,
        fmt_money(&new.amount, &symbol),
        new.date,
        new.category
    );
    Ok(())
}

fn remove(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let removed = ledger::remove_transaction(conn, id)?;
    match removed.debt_id {
        Some(debt_id) => println!("Removed transaction #{} (restored debt #{})", id, debt_id),
        None => println!("Removed transaction #{}", id),
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = currency_symbol(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    fmt_money(&r.amount, &symbol),
                    r.description.clone(),
                    r.tags.clone(),
                    r.debt.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description", "Tags", "Debt"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: rust_decimal::Decimal,
    pub description: String,
    pub tags: String,
    pub debt: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            category: t.category.clone(),
            amount: t.amount,
            description: t.description.clone().unwrap_or_default(),
            tags: t.tags.join(", "),
            debt: t.debt_id.map(|d| format!("#{}", d)).unwrap_or_default(),
        }
    }
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let range = range_from(sub)?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    let category = sub.get_one::<String>("category");

    let rows = transactions::in_range(conn, &range)?
        .iter()
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .take(sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX))
        .map(TransactionRow::from)
        .collect();
    Ok(rows)
}
