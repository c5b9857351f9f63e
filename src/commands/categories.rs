// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::for_type;
use crate::models::TransactionType;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kind = sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>())
            .transpose()?;
        let kinds = match kind {
            Some(k) => vec![k],
            None => vec![TransactionType::Expense, TransactionType::Income],
        };
        let data = kinds
            .into_iter()
            .flat_map(|k| {
                for_type(k)
                    .iter()
                    .map(move |c| vec![c.to_string(), k.to_string()])
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Type"], data));
    }
    Ok(())
}
