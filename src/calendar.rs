use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::scheduler::Assignment;

/// One display-ready grid cell. Leading padding cells carry no date; day
/// cells carry their date and, when scheduled, that date's assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    pub assignment: Option<Assignment>,
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap();
    first_of_next.signed_duration_since(first_of_month).num_days() as u32
}

/// Column index of a date in a Sunday-first week, 0-6.
pub fn weekday_offset(date: NaiveDate) -> u32 {
    match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// Lay out one month as an ordered cell run: empty cells until day 1 lands
/// under its weekday column, then one cell per calendar day. Assignments
/// are looked up by exact date; an empty map still produces the full grid.
///
/// A month outside 1-12 is a caller error and panics on date construction.
pub fn build_grid(
    year: i32,
    month: u32,
    assignments: &BTreeMap<NaiveDate, Assignment>,
) -> Vec<CalendarCell> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let mut cells = Vec::new();

    for _ in 0..weekday_offset(first_of_month) {
        cells.push(CalendarCell {
            date: None,
            assignment: None,
        });
    }

    for day in 1..=days_in_month(year, month) {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        cells.push(CalendarCell {
            date: Some(date),
            assignment: assignments.get(&date).cloned(),
        });
    }

    cells
}
