//! Preview binary for printing a month's rotation schedule to the terminal.
//!
//! Usage: cargo run --bin preview
//!        cargo run --bin preview -- --plan other.toml
//!        cargo run --bin preview -- --month 2026-10
//!
//! Reads the task rotation from a TOML plan file and prints the month grid
//! without starting the web server.

mod calendar;
mod scheduler;

use std::fs;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use clap::Parser;
use serde::Deserialize;

use crate::calendar::{build_grid, days_in_month, month_name};
use crate::scheduler::schedule;

#[derive(Parser, Debug)]
#[command(name = "preview")]
#[command(about = "Print the rotation schedule for one month")]
struct Args {
    /// Plan file with the task rotation and month to display
    #[arg(long, default_value = "plan.toml")]
    plan: String,

    /// Month to display as YYYY-MM (overrides the plan)
    #[arg(long)]
    month: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Plan {
    tasks: Vec<String>,
    start_day: u32,
    year: i32,
    month: u32,
}

fn parse_month(value: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 2 {
        bail!("Invalid month format '{}', expected YYYY-MM", value);
    }
    let year = parts[0]
        .parse()
        .with_context(|| format!("Invalid year: '{}'", parts[0]))?;
    let month = parts[1]
        .parse()
        .with_context(|| format!("Invalid month: '{}'", parts[1]))?;
    Ok((year, month))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.plan)
        .with_context(|| format!("Cannot read plan file '{}'", args.plan))?;
    let mut plan: Plan =
        toml::from_str(&raw).with_context(|| format!("Cannot parse plan file '{}'", args.plan))?;

    if let Some(value) = &args.month {
        let (year, month) = parse_month(value)?;
        plan.year = year;
        plan.month = month;
    }

    if plan.month < 1 || plan.month > 12 {
        bail!("Month {} is out of range (1-12)", plan.month);
    }
    if plan.start_day < 1 || plan.start_day > 31 {
        bail!("Start day {} is out of range (1-31)", plan.start_day);
    }
    if plan.tasks.is_empty() {
        bail!("Plan contains no tasks");
    }

    let first_of_month = NaiveDate::from_ymd_opt(plan.year, plan.month, 1).unwrap();
    let last_of_month =
        NaiveDate::from_ymd_opt(plan.year, plan.month, days_in_month(plan.year, plan.month))
            .unwrap();
    // Start days past the end of the month roll into the next one
    let start = first_of_month + Duration::days(plan.start_day as i64 - 1);

    let assignments = schedule(&plan.tasks, start, last_of_month);
    let cells = build_grid(plan.year, plan.month, &assignments);

    println!("{} {}", month_name(plan.month), plan.year);
    println!("Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        match cell.date {
            Some(date) => {
                let marker = if cell.assignment.is_some() { '*' } else { ' ' };
                line.push_str(&format!("{:>3}{} ", date.day(), marker));
            }
            None => line.push_str("     "),
        }
        if (index + 1) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    println!();
    println!("Scheduled tasks:");
    for (date, assignment) in &assignments {
        println!(
            "  {}  {} ({})",
            date.format("%b %d"),
            assignment.task,
            assignment.sequence_label
        );
    }

    Ok(())
}
