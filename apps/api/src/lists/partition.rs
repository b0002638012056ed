//! Scheduled / unscheduled split shared by every list view.

use chrono::NaiveDate;
use serde::Serialize;

use crate::lists::models::SavedListItem;

/// Anything carrying an optional ISO schedule date.
pub trait Scheduled {
    fn scheduled_date(&self) -> Option<&str>;
}

impl Scheduled for SavedListItem {
    fn scheduled_date(&self) -> Option<&str> {
        self.scheduled_date.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionedList<T> {
    pub scheduled: Vec<T>,
    pub unscheduled: Vec<T>,
}

/// Splits items into scheduled (ascending by date) and unscheduled (input order).
///
/// A missing or empty date counts as unscheduled. Any other date that is not
/// a zero-padded `YYYY-MM-DD` (whitespace included) is scheduled and sorts as
/// the empty string, ahead of every valid date. Ties keep their input order.
pub fn partition_by_schedule<T: Scheduled>(items: Vec<T>) -> PartitionedList<T> {
    let (mut scheduled, unscheduled): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| item.scheduled_date().is_some_and(|d| !d.is_empty()));

    // sort_by is stable, so equal dates keep their input order.
    scheduled.sort_by(|a, b| sort_key(a.scheduled_date()).cmp(sort_key(b.scheduled_date())));

    PartitionedList {
        scheduled,
        unscheduled,
    }
}

fn sort_key(date: Option<&str>) -> &str {
    match date {
        Some(d) if is_iso_date(d) => d,
        _ => "",
    }
}

fn is_iso_date(text: &str) -> bool {
    text.len() == 10 && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}
