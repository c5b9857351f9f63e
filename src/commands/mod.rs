// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod debts;
pub mod doctor;
pub mod exporter;
pub mod importer;
pub mod settings;
pub mod transactions;

use anyhow::Result;

use crate::filter::DateRange;
use crate::utils::parse_date;

pub(crate) fn range_from(sub: &clap::ArgMatches) -> Result<DateRange> {
    let start = sub
        .get_one::<String>("start")
        .map(|s| parse_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            anyhow::bail!("Start date {} is after end date {}", s, e);
        }
    }
    Ok(DateRange::new(start, end))
}
