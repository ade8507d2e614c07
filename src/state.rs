use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::{build_grid, days_in_month, CalendarCell};
use crate::config;
use crate::scheduler::schedule;

// Shared in-memory state; nothing is persisted across restarts.
pub type SharedState = Arc<Mutex<CalendarState>>;

/// The four inputs the shell owns: task list, start day, activation flag,
/// and the displayed month. Everything downstream is recomputed from a
/// snapshot of these on every change.
pub struct CalendarState {
    pub tasks: Vec<String>,
    pub start_day: Option<u32>,
    pub sequence_started: bool,
    pub year: i32,
    pub month: u32,
}

impl CalendarState {
    pub fn new() -> Self {
        let today = config::today();
        CalendarState {
            tasks: Vec::new(),
            start_day: None,
            sequence_started: false,
            year: today.year(),
            month: today.month(),
        }
    }

    /// Append a task; blank input is ignored
    pub fn add_task(&mut self, label: &str) {
        let label = label.trim();
        if !label.is_empty() {
            self.tasks.push(label.to_string());
        }
    }

    /// Remove by index, keeping the rest in order; out of range is a no-op
    pub fn remove_task(&mut self, index: usize) {
        if index < self.tasks.len() {
            self.tasks.remove(index);
        }
    }

    /// Fix the start day and begin generating the sequence. One-way until
    /// reset: a started sequence cannot be restarted or re-anchored.
    pub fn start_sequence(&mut self, day: u32) -> Result<(), String> {
        if self.sequence_started {
            return Err("Sequence already started".to_string());
        }
        if self.tasks.is_empty() {
            return Err("Add at least one task before starting".to_string());
        }
        if day < 1 || day > 31 {
            return Err(format!("Start day {} is out of range (1-31)", day));
        }
        self.start_day = Some(day);
        self.sequence_started = true;
        Ok(())
    }

    /// Move the displayed month by `delta` months, carrying into the year
    pub fn navigate(&mut self, delta: i32) {
        let zero_based = self.month as i32 - 1 + delta;
        self.year += zero_based.div_euclid(12);
        self.month = (zero_based.rem_euclid(12) + 1) as u32;
    }

    /// Clear everything and return the display to the current month
    pub fn reset(&mut self) {
        let today = config::today();
        self.tasks.clear();
        self.start_day = None;
        self.sequence_started = false;
        self.year = today.year();
        self.month = today.month();
    }

    pub fn snapshot(&self) -> PlannerInputs {
        PlannerInputs {
            tasks: self.tasks.clone(),
            start_day: self.start_day,
            sequence_started: self.sequence_started,
            year: self.year,
            month: self.month,
        }
    }
}

/// Immutable inputs for one regeneration pass. The shell keeps the mutable
/// copy; the pure core only ever sees one of these.
#[derive(Clone, Debug)]
pub struct PlannerInputs {
    pub tasks: Vec<String>,
    pub start_day: Option<u32>,
    pub sequence_started: bool,
    pub year: i32,
    pub month: u32,
}

impl PlannerInputs {
    /// Concrete start date: the start day anchored to the displayed month.
    /// Day numbers past the end of the month roll into the next one.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let day = self.start_day?;
        let first_of_month = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap();
        Some(first_of_month + Duration::days(day as i64 - 1))
    }

    pub fn last_of_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, days_in_month(self.year, self.month))
            .unwrap()
    }
}

/// One full regeneration: schedule the displayed month if a sequence is
/// active, otherwise fall straight through to the empty calendar.
pub fn regenerate(inputs: &PlannerInputs) -> Vec<CalendarCell> {
    let assignments = match inputs.start_date() {
        Some(start) if inputs.sequence_started && !inputs.tasks.is_empty() => {
            schedule(&inputs.tasks, start, inputs.last_of_month())
        }
        _ => BTreeMap::new(),
    };
    build_grid(inputs.year, inputs.month, &assignments)
}
