// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketbook::commands::exporter::export;
use pocketbook::commands::importer::import_transactions;
use pocketbook::export::{ExportFormat, ExportOutcome};
use pocketbook::models::{NewTransaction, TransactionType};
use pocketbook::store::{ledger, transactions};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    pocketbook::db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn imports_rows_in_export_layout() {
    let mut conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.csv");
    fs::write(
        &path,
        "Date,Amount,Type,Category,Description,Tags\n\
         2024-01-05,42.5,expense,\"Food, Drinks\",\"lunch with \"\"Sam\"\"\",\"work;team\"\n\
         2024-01-01,3000,income,Salary,\"\",\"\"\n\
         2024-01-07,8,expense,Other\n",
    )
    .unwrap();

    let n = import_transactions(&mut conn, &path).unwrap();
    assert_eq!(n, 3);

    let all = transactions::list_all(&conn).unwrap();
    let lunch = all.iter().find(|t| t.date.to_string() == "2024-01-05").unwrap();
    assert_eq!(lunch.category, "Food, Drinks");
    assert_eq!(lunch.description.as_deref(), Some("lunch with \"Sam\""));
    assert_eq!(lunch.tags, vec!["work".to_string(), "team".to_string()]);
    assert_eq!(lunch.amount, "42.5".parse::<Decimal>().unwrap());

    let salary = all.iter().find(|t| t.r#type == TransactionType::Income).unwrap();
    assert_eq!(salary.description, None);
    assert!(salary.tags.is_empty());

    let short = all.iter().find(|t| t.category == "Other").unwrap();
    assert!(short.tags.is_empty());
}

#[test]
fn bad_row_rolls_back_the_whole_file() {
    let mut conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        "Date,Amount,Type,Category,Description,Tags\n\
         2024-01-05,10,expense,Other,\"\",\"\"\n\
         2024-01-06,ten,expense,Other,\"\",\"\"\n",
    )
    .unwrap();
    let err = import_transactions(&mut conn, &path).unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));
    assert!(transactions::list_all(&conn).unwrap().is_empty());
}

#[test]
fn unknown_type_is_rejected() {
    let mut conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("type.csv");
    fs::write(
        &path,
        "Date,Amount,Type,Category,Description,Tags\n2024-01-05,10,transfer,Other,\"\",\"\"\n",
    )
    .unwrap();
    assert!(import_transactions(&mut conn, &path).is_err());
}

#[test]
fn export_then_import_reproduces_transactions() {
    let mut src = setup();
    for t in [
        NewTransaction::expense(
            chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "12.34".parse().unwrap(),
            "Food & Dining",
        )
        .with_description("bagels, \"fresh\"")
        .with_tags(vec!["breakfast".into()]),
        NewTransaction::income(
            chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Decimal::from(500),
            "Freelance",
        ),
    ] {
        ledger::record_transaction(&mut src, &t).unwrap();
    }
    let dir = tempdir().unwrap();
    let at = NaiveDateTime::parse_from_str("2024-02-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let ExportOutcome::Written(paths) =
        export(&src, "transactions", ExportFormat::Csv, dir.path(), at).unwrap()
    else {
        panic!("expected an export file");
    };

    let mut dst = setup();
    assert_eq!(import_transactions(&mut dst, &paths[0]).unwrap(), 2);
    // Same date on both rows, so ids decide list order; compare by category.
    let key = |c: &Connection| {
        let mut rows: Vec<_> = transactions::list_all(c)
            .unwrap()
            .into_iter()
            .map(|t| (t.category, t.date, t.amount, t.r#type, t.description, t.tags))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    };
    assert_eq!(key(&src), key(&dst));
}
