// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::error::FinanceError;
use pocketbook::filter::DateRange;
use pocketbook::models::{
    BudgetPatch, DebtPatch, NewBudget, NewDebt, NewTransaction, TransactionPatch, TransactionType,
};
use pocketbook::store::{budgets, debts, transactions};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    pocketbook::db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seed(conn: &Connection) -> Vec<i64> {
    [
        NewTransaction::income(d("2024-01-01"), Decimal::from(3000), "Salary"),
        NewTransaction::expense(d("2024-01-10"), "45.10".parse().unwrap(), "Food & Dining")
            .with_description("groceries")
            .with_tags(vec!["home".into(), "weekly".into()]),
        NewTransaction::expense(d("2024-01-10"), Decimal::from(60), "Transportation"),
        NewTransaction::expense(d("2024-02-03"), Decimal::from(15), "Food & Dining"),
    ]
    .iter()
    .map(|t| transactions::add(conn, t).unwrap())
    .collect()
}

#[test]
fn transaction_round_trips_through_sqlite() {
    let conn = setup();
    let ids = seed(&conn);
    let t = transactions::require(&conn, ids[1]).unwrap();
    assert_eq!(t.date, d("2024-01-10"));
    assert_eq!(t.amount, "45.10".parse::<Decimal>().unwrap());
    assert_eq!(t.description.as_deref(), Some("groceries"));
    assert_eq!(t.tags, vec!["home".to_string(), "weekly".to_string()]);
    assert_eq!(t.r#type, TransactionType::Expense);
    assert!(!t.synced);
    assert!(t.local_id.is_some());
}

#[test]
fn listing_is_newest_first_with_id_tiebreak() {
    let conn = setup();
    let ids = seed(&conn);
    let listed: Vec<i64> = transactions::list_all(&conn)
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(listed, vec![ids[3], ids[2], ids[1], ids[0]]);
}

#[test]
fn indexed_queries_filter_in_sql() {
    let conn = setup();
    seed(&conn);
    let jan = DateRange::new(Some(d("2024-01-01")), Some(d("2024-01-31")));
    assert_eq!(transactions::in_range(&conn, &jan).unwrap().len(), 3);
    let from_tenth = DateRange::new(Some(d("2024-01-10")), None);
    assert_eq!(transactions::in_range(&conn, &from_tenth).unwrap().len(), 3);
    assert_eq!(
        transactions::by_category(&conn, "Food & Dining").unwrap().len(),
        2
    );
    assert_eq!(
        transactions::by_type(&conn, TransactionType::Income)
            .unwrap()
            .len(),
        1
    );
    assert_eq!(transactions::unsynced(&conn).unwrap().len(), 4);
}

#[test]
fn patch_touches_only_given_fields() {
    let conn = setup();
    let ids = seed(&conn);
    transactions::update(
        &conn,
        ids[1],
        &TransactionPatch {
            category: Some("Shopping".into()),
            description: Some(None),
            synced: Some(true),
            ..Default::default()
        },
    )
    .unwrap();
    let t = transactions::require(&conn, ids[1]).unwrap();
    assert_eq!(t.category, "Shopping");
    assert_eq!(t.description, None);
    assert_eq!(t.amount, "45.10".parse::<Decimal>().unwrap());
    assert_eq!(t.tags.len(), 2);
    assert!(t.synced);
    assert_eq!(transactions::unsynced(&conn).unwrap().len(), 3);
}

#[test]
fn debt_linked_amount_cannot_be_patched() {
    let conn = setup();
    let id = transactions::add(
        &conn,
        &NewTransaction::expense(d("2024-01-05"), Decimal::from(30), "Debt Payments").paying_debt(7),
    )
    .unwrap();
    let patch = TransactionPatch {
        amount: Some(Decimal::from(10)),
        ..Default::default()
    };
    assert!(transactions::update(&conn, id, &patch).is_err());
    let ok = TransactionPatch {
        description: Some(Some("fixed note".into())),
        ..Default::default()
    };
    transactions::update(&conn, id, &ok).unwrap();
}

#[test]
fn missing_records_report_not_found() {
    let conn = setup();
    let err = transactions::delete(&conn, 42).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::not_found("Transaction", 42))
    );
    assert!(budgets::delete(&conn, 1).is_err());
    assert!(debts::delete(&conn, 1).is_err());
    assert!(transactions::get(&conn, 42).unwrap().is_none());
}

#[test]
fn budgets_by_month_and_update() {
    let conn = setup();
    let add = |cat: &str, month: &str| {
        budgets::add(
            &conn,
            &NewBudget {
                category: cat.into(),
                amount: Decimal::from(200),
                month: month.into(),
            },
        )
        .unwrap()
    };
    let a = add("Housing", "2024-01");
    add("Utilities", "2024-01");
    add("Housing", "2024-02");
    assert_eq!(budgets::by_month(&conn, "2024-01").unwrap().len(), 2);
    assert_eq!(budgets::by_category(&conn, "Housing").unwrap().len(), 2);

    budgets::update(
        &conn,
        a,
        &BudgetPatch {
            amount: Some(Decimal::from(250)),
            ..Default::default()
        },
    )
    .unwrap();
    let b = budgets::get(&conn, a).unwrap().unwrap();
    assert_eq!(b.amount, Decimal::from(250));
    assert_eq!(b.month, "2024-01");
}

#[test]
fn debts_store_optional_creation_date() {
    let conn = setup();
    let id = debts::add(
        &conn,
        &NewDebt {
            name: "Student Loan".into(),
            principal: Decimal::from(20000),
            interest_rate: "5.5".parse().unwrap(),
            minimum_payment: Decimal::from(220),
            current_balance: Decimal::from(18000),
            created_date: None,
        },
    )
    .unwrap();
    let debt = debts::get(&conn, id).unwrap().unwrap();
    assert_eq!(debt.created_date, None);
    assert_eq!(debt.interest_rate, "5.5".parse::<Decimal>().unwrap());

    debts::update(
        &conn,
        id,
        &DebtPatch {
            created_date: Some(d("2022-09-01")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        debts::by_name(&conn, "Student Loan").unwrap()[0].created_date,
        Some(d("2022-09-01"))
    );
}
