use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

/// The repeating block lengths, in days. Each block assigns one full task
/// rotation, then idles until the block has spanned its interval in total.
pub const INTERVAL_SEQUENCE: [u32; 3] = [3, 5, 7];

/// One scheduled date: the task on rotation that day plus the interval of
/// the block the date belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub task: String,
    pub interval: u32,
    pub sequence_label: String,
}

pub fn sequence_label(interval: u32) -> String {
    format!("{}-day sequence", interval)
}

/// Walk forward from `start`, assigning one task per day in list order.
/// After each completed rotation the cursor jumps ahead so the finished
/// block spans exactly its interval, then the next interval takes over.
///
/// The jump is `interval - tasks.len()` days and is not clamped: with more
/// tasks than the interval it is negative and the cursor revisits dates it
/// already assigned, overwriting them. Net movement per block still equals
/// the interval, so the walk always reaches `range_end`.
pub fn schedule(
    tasks: &[String],
    start: NaiveDate,
    range_end: NaiveDate,
) -> BTreeMap<NaiveDate, Assignment> {
    let mut assignments = BTreeMap::new();
    if tasks.is_empty() {
        return assignments;
    }

    let mut cursor = start;
    let mut sequence_index = 0;
    let mut task_index = 0;
    let mut days_in_current_interval = 0;

    while cursor <= range_end {
        let interval = INTERVAL_SEQUENCE[sequence_index];

        // Last write wins when a backward jump revisits a date
        assignments.insert(
            cursor,
            Assignment {
                task: tasks[task_index].clone(),
                interval,
                sequence_label: sequence_label(interval),
            },
        );

        task_index = (task_index + 1) % tasks.len();
        days_in_current_interval += 1;

        // One full rotation finished: select the next interval
        if task_index == 0 && days_in_current_interval >= tasks.len() {
            sequence_index = (sequence_index + 1) % INTERVAL_SEQUENCE.len();
            days_in_current_interval = 0;
        }

        cursor = cursor + Duration::days(1);

        // Pad the finished block out to its full span, using the interval
        // of the block just completed rather than the newly selected one
        if task_index == 0 && days_in_current_interval == 0 {
            cursor = cursor + Duration::days(interval as i64 - tasks.len() as i64);
        }
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task_list(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn assert_assigned(
        assignments: &BTreeMap<NaiveDate, Assignment>,
        on: NaiveDate,
        task: &str,
        interval: u32,
    ) {
        let assignment = assignments
            .get(&on)
            .unwrap_or_else(|| panic!("expected an assignment on {}", on));
        assert_eq!(assignment.task, task);
        assert_eq!(assignment.interval, interval);
        assert_eq!(assignment.sequence_label, format!("{}-day sequence", interval));
    }

    #[test]
    fn test_three_tasks_over_thirty_day_month() {
        let tasks = task_list(&["Task1", "Task2", "Task3"]);
        let assignments = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));

        // 3-day block: days 1-3 active, no filler since 3 - 3 = 0
        assert_assigned(&assignments, date(2026, 4, 1), "Task1", 3);
        assert_assigned(&assignments, date(2026, 4, 2), "Task2", 3);
        assert_assigned(&assignments, date(2026, 4, 3), "Task3", 3);

        // 5-day block: days 4-6 active, days 7-8 filler
        assert_assigned(&assignments, date(2026, 4, 4), "Task1", 5);
        assert_assigned(&assignments, date(2026, 4, 5), "Task2", 5);
        assert_assigned(&assignments, date(2026, 4, 6), "Task3", 5);
        assert!(!assignments.contains_key(&date(2026, 4, 7)));
        assert!(!assignments.contains_key(&date(2026, 4, 8)));

        // 7-day block: days 9-11 active, days 12-15 filler
        assert_assigned(&assignments, date(2026, 4, 9), "Task1", 7);
        assert_assigned(&assignments, date(2026, 4, 10), "Task2", 7);
        assert_assigned(&assignments, date(2026, 4, 11), "Task3", 7);
        for day in 12..=15 {
            assert!(!assignments.contains_key(&date(2026, 4, day)));
        }

        // Pattern repeats from the top
        assert_assigned(&assignments, date(2026, 4, 16), "Task1", 3);
        assert_assigned(&assignments, date(2026, 4, 18), "Task3", 3);
        assert_assigned(&assignments, date(2026, 4, 19), "Task1", 5);
        assert_assigned(&assignments, date(2026, 4, 21), "Task3", 5);
        assert!(!assignments.contains_key(&date(2026, 4, 22)));
        assert!(!assignments.contains_key(&date(2026, 4, 23)));
        assert_assigned(&assignments, date(2026, 4, 24), "Task1", 7);
        assert_assigned(&assignments, date(2026, 4, 26), "Task3", 7);
        for day in 27..=30 {
            assert!(!assignments.contains_key(&date(2026, 4, day)));
        }

        assert_eq!(assignments.len(), 18);
    }

    #[test]
    fn test_rotation_preserves_list_order() {
        let tasks = task_list(&["Wash", "Sweep"]);
        let assignments = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));

        // Two tasks leave a filler tail in every block; active pairs start
        // each block in original list order.
        let block_starts = [
            date(2026, 4, 1),
            date(2026, 4, 4),
            date(2026, 4, 9),
            date(2026, 4, 16),
            date(2026, 4, 19),
            date(2026, 4, 24),
        ];
        for start in block_starts {
            assert_eq!(assignments.get(&start).unwrap().task, "Wash");
            assert_eq!(
                assignments.get(&(start + Duration::days(1))).unwrap().task,
                "Sweep"
            );
        }
    }

    #[test]
    fn test_interval_advances_once_per_block_and_wraps() {
        let tasks = task_list(&["Task1", "Task2", "Task3"]);
        let assignments = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));

        let block_starts = [1, 4, 9, 16, 19, 24];
        let expected_intervals = [3, 5, 7, 3, 5, 7];
        for (day, interval) in block_starts.iter().zip(expected_intervals) {
            assert_eq!(
                assignments.get(&date(2026, 4, *day)).unwrap().interval,
                interval
            );
        }
    }

    #[test]
    fn test_filler_gap_is_interval_minus_task_count() {
        let tasks = task_list(&["Wash", "Sweep"]);
        let assignments = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));

        // 3-day block: one filler day
        assert!(!assignments.contains_key(&date(2026, 4, 3)));
        // 5-day block: three filler days
        for day in 6..=8 {
            assert!(!assignments.contains_key(&date(2026, 4, day)));
        }
        // 7-day block: five filler days
        for day in 11..=15 {
            assert!(!assignments.contains_key(&date(2026, 4, day)));
        }
    }

    #[test]
    fn test_single_task_spaces_out_by_interval() {
        let tasks = task_list(&["Only"]);
        let assignments = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));

        let expected = [(1, 3), (4, 5), (9, 7), (16, 3), (19, 5), (24, 7)];
        assert_eq!(assignments.len(), expected.len());
        for (day, interval) in expected {
            assert_assigned(&assignments, date(2026, 4, day), "Only", interval);
        }
    }

    // More tasks than the interval: the filler jump goes negative and the
    // next block overwrites the tail of the previous one. This pins the
    // literal behavior rather than clamping it.
    #[test]
    fn test_longer_task_list_backs_up_and_overwrites() {
        let tasks = task_list(&["A", "B", "C", "D", "E"]);
        let assignments = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 20));

        // The 3-day block assigned days 1-5, but the cursor then backed up
        // two days and the 5-day block reclaimed days 4 and 5.
        assert_assigned(&assignments, date(2026, 4, 1), "A", 3);
        assert_assigned(&assignments, date(2026, 4, 2), "B", 3);
        assert_assigned(&assignments, date(2026, 4, 3), "C", 3);
        assert_assigned(&assignments, date(2026, 4, 4), "A", 5);
        assert_assigned(&assignments, date(2026, 4, 5), "B", 5);
        assert_assigned(&assignments, date(2026, 4, 6), "C", 5);
        assert_assigned(&assignments, date(2026, 4, 7), "D", 5);
        assert_assigned(&assignments, date(2026, 4, 8), "E", 5);

        // 5-day block equals the task count, so the 7-day block abuts it
        for (offset, task) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            assert_assigned(&assignments, date(2026, 4, 9 + offset as u32), task, 7);
        }
        assert!(!assignments.contains_key(&date(2026, 4, 14)));
        assert!(!assignments.contains_key(&date(2026, 4, 15)));

        // Second cycle: another back-up overwrites days 19-20
        assert_assigned(&assignments, date(2026, 4, 16), "A", 3);
        assert_assigned(&assignments, date(2026, 4, 17), "B", 3);
        assert_assigned(&assignments, date(2026, 4, 18), "C", 3);
        assert_assigned(&assignments, date(2026, 4, 19), "A", 5);
        assert_assigned(&assignments, date(2026, 4, 20), "B", 5);

        // No 3-day assignment survives past the third rotation slot
        assert!(
            assignments
                .values()
                .all(|assignment| !(assignment.task == "D" && assignment.interval == 3))
        );
    }

    #[test]
    fn test_empty_task_list_yields_no_assignments() {
        let assignments = schedule(&[], date(2026, 4, 1), date(2026, 4, 30));
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_start_after_range_end_yields_no_assignments() {
        let tasks = task_list(&["Task1"]);
        let assignments = schedule(&tasks, date(2026, 5, 1), date(2026, 4, 30));
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_schedule_is_repeatable() {
        let tasks = task_list(&["Task1", "Task2", "Task3"]);
        let first = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));
        let second = schedule(&tasks, date(2026, 4, 1), date(2026, 4, 30));
        assert_eq!(first, second);
    }

    #[test]
    fn test_schedule_crosses_month_boundaries() {
        let tasks = task_list(&["Task1", "Task2", "Task3"]);
        let assignments = schedule(&tasks, date(2026, 3, 30), date(2026, 4, 5));

        assert_assigned(&assignments, date(2026, 3, 30), "Task1", 3);
        assert_assigned(&assignments, date(2026, 3, 31), "Task2", 3);
        assert_assigned(&assignments, date(2026, 4, 1), "Task3", 3);
        assert_assigned(&assignments, date(2026, 4, 2), "Task1", 5);
    }
}
