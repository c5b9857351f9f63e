// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::commands::doctor;
use pocketbook::db::{SCHEMA_VERSION, init_schema, open_at};
use pocketbook::settings;
use pocketbook::utils::today;
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn fresh_database_is_stamped_with_current_schema() {
    let conn = setup();
    assert_eq!(settings::schema_version(&conn).unwrap(), SCHEMA_VERSION);
    assert_eq!(settings::currency_symbol(&conn).unwrap(), "$");
    assert_eq!(settings::export_dir(&conn).unwrap(), None);
}

#[test]
fn upgrade_backfills_debt_creation_dates() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO debts(name, principal, interest_rate, minimum_payment, current_balance)
         VALUES ('Old card', '500', '19.9', '25', '420')",
        [],
    )
    .unwrap();
    settings::set(&conn, settings::SCHEMA_VERSION_KEY, "1").unwrap();
    assert_eq!(doctor::check(&conn).unwrap()[0][0], "debt_undated");

    init_schema(&mut conn).unwrap();
    let created: String = conn
        .query_row("SELECT created_date FROM debts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(created, today().to_string());
    assert_eq!(settings::schema_version(&conn).unwrap(), SCHEMA_VERSION);
    assert!(doctor::check(&conn).unwrap().is_empty());
}

#[test]
fn init_is_idempotent_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.sqlite");
    let conn = open_at(&path).unwrap();
    settings::set(&conn, settings::CURRENCY_SYMBOL_KEY, "€").unwrap();
    drop(conn);
    let conn = open_at(&path).unwrap();
    assert_eq!(settings::currency_symbol(&conn).unwrap(), "€");
}

#[test]
fn user_settings_round_trip() {
    let conn = setup();
    assert!(settings::ensure_user_key("export_dir").is_ok());
    assert!(settings::ensure_user_key("schema_version").is_err());
    assert!(settings::ensure_user_key("colour").is_err());

    settings::set(&conn, settings::EXPORT_DIR_KEY, "/tmp/out").unwrap();
    settings::set(&conn, settings::EXPORT_DIR_KEY, "/tmp/exports").unwrap();
    assert_eq!(
        settings::export_dir(&conn).unwrap(),
        Some(std::path::PathBuf::from("/tmp/exports"))
    );
    let keys: Vec<String> = settings::list(&conn)
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec!["export_dir", "schema_version"]);

    settings::unset(&conn, settings::EXPORT_DIR_KEY).unwrap();
    assert_eq!(settings::get(&conn, settings::EXPORT_DIR_KEY).unwrap(), None);
}

#[test]
fn doctor_flags_bad_months_and_negative_balances() {
    let conn = setup();
    conn.execute(
        "INSERT INTO budgets(category, amount, month) VALUES ('Housing', '100', '2024-7')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO debts(name, principal, interest_rate, minimum_payment, current_balance, created_date)
         VALUES ('Odd', '100', '0', '10', '-5', '2024-01-01')",
        [],
    )
    .unwrap();
    let issues: Vec<String> = doctor::check(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    assert_eq!(issues, vec!["budget_bad_month", "debt_negative_balance"]);
}
