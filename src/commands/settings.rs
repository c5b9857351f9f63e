// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::{self, ensure_user_key};
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = settings::get(conn, key)?
                .ok_or_else(|| anyhow!("Setting '{}' is not set", key))?;
            println!("{}", value);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap().trim();
            ensure_user_key(key)?;
            settings::set(conn, key, value)?;
            println!("Set {} = {}", key, value);
        }
        Some(("unset", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            ensure_user_key(key)?;
            settings::unset(conn, key)?;
            println!("Unset {}", key);
        }
        Some(("list", _)) => {
            let rows = settings::list(conn)?
                .into_iter()
                .map(|(k, v)| vec![k, v])
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
