// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Inclusive date-window filtering shared by all record types.

use chrono::NaiveDate;

use crate::models::{Budget, Debt, Transaction};
use crate::utils::month_start;

/// Anything that can be placed on the calendar for range filtering.
///
/// Returning `None` means the record has no usable date and is always kept.
pub trait Dated {
    fn range_date(&self) -> Option<NaiveDate>;
}

impl Dated for Transaction {
    fn range_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

impl Dated for Budget {
    fn range_date(&self) -> Option<NaiveDate> {
        month_start(&self.month).ok()
    }
}

impl Dated for Debt {
    fn range_date(&self) -> Option<NaiveDate> {
        self.created_date
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Undated records pass unconditionally so legacy rows never disappear.
    pub fn admits<T: Dated>(&self, item: &T) -> bool {
        match item.range_date() {
            Some(d) => self.contains(d),
            None => true,
        }
    }

    /// Returns the in-range items in their original order.
    pub fn apply<T: Dated + Clone>(&self, items: &[T]) -> Vec<T> {
        if self.is_unbounded() {
            return items.to_vec();
        }
        items.iter().filter(|i| self.admits(*i)).cloned().collect()
    }
}
