// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("start")
            .long("start")
            .value_name("YYYY-MM-DD")
            .help("Inclusive start date"),
    )
    .arg(
        Arg::new("end")
            .long("end")
            .value_name("YYYY-MM-DD")
            .help("Inclusive end date"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse income and expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .help("Comma-separated labels"),
                )
                .arg(
                    Arg::new("debt")
                        .long("debt")
                        .value_parser(value_parser!(i64))
                        .help("Debt id this expense pays down"),
                ),
        )
        .subcommand(json_flags(range_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )))
        .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly spending caps per category")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a budget")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month"))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(json_flags(range_args(
            Command::new("list")
                .about("List budgets")
                .arg(Arg::new("month").long("month")),
        )))
        .subcommand(Command::new("rm").about("Delete a budget").arg(id_arg()))
        .subcommand(json_flags(
            Command::new("progress")
                .about("Spend against each budget of a month")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
        ))
}

fn debt_cmd() -> Command {
    Command::new("debt")
        .about("Track liabilities toward payoff")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a debt")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("principal")
                        .long("principal")
                        .required(true)
                        .help("Original amount"),
                )
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .help("Annual interest rate in percent"),
                )
                .arg(Arg::new("min_payment").long("min-payment").required(true))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .help("Current balance, defaults to the principal"),
                )
                .arg(Arg::new("created").long("created").help("YYYY-MM-DD, defaults to today")),
        )
        .subcommand(json_flags(range_args(
            Command::new("list").about("List debts with payoff projections"),
        )))
        .subcommand(Command::new("rm").about("Delete a debt").arg(id_arg()))
        .subcommand(
            Command::new("pay")
                .about("Record a payment as a linked expense")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description")),
        )
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(clap::crate_version!())
        .about("Local-first personal finance: transactions, budgets, and debt payoff")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(debt_cmd())
        .subcommand(json_flags(range_args(
            Command::new("dashboard")
                .about("Income, expenses, categories, budgets and debt at a glance")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["start", "end"])
                        .help("Use every transaction instead of the current month"),
                ),
        )))
        .subcommand(
            Command::new("export")
                .about("Write records to CSV or JSON files")
                .arg(
                    Arg::new("what")
                        .required(true)
                        .value_parser(["transactions", "budgets", "debts", "all"]),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(
                    Arg::new("out_dir")
                        .long("out-dir")
                        .help("Directory for exported files"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Load records from files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Import a transactions CSV in the export layout")
                        .arg(Arg::new("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Suggested categories")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(["income", "expense"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Persisted settings")
                .subcommand_required(true)
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("unset").arg(Arg::new("key").required(true)))
                .subcommand(Command::new("list")),
        )
        .subcommand(Command::new("doctor").about("Check stored records for inconsistencies"))
}
