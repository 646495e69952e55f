//! Task model and the list derivation engine
//!
//! The backend owns the task collection; the client replaces its whole
//! in-memory list on every successful fetch. Ordering is established once
//! at fetch time (stable ascending sort by deadline), and `derive` turns
//! that list plus search text and the current clock into the two display
//! partitions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A task as returned by the backend
///
/// `late` is derived client-side and never serialized back; a task
/// arriving from the wire starts not-late until the engine says
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD` on the wire
    pub deadline: NaiveDate,
    pub completed: bool,
    #[serde(skip_serializing, default)]
    pub late: bool,
}

/// Validated payload for task creation
///
/// The repository adds `userId` and `completed: false` when it builds the
/// wire body.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub deadline: NaiveDate,
}

/// The two display partitions produced by [`derive`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partitions {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Validate task creation input
///
/// Title required, deadline not in the past.
pub fn validate_new_task(title: &str, deadline: NaiveDate, today: NaiveDate) -> Result<NewTask> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title is required".to_string()));
    }
    if deadline < today {
        return Err(Error::Validation(format!(
            "deadline {} is in the past",
            deadline
        )));
    }
    Ok(NewTask {
        title: title.to_string(),
        deadline,
    })
}

/// Stable ascending sort by deadline, applied once at fetch time
///
/// Ties keep their fetch order.
pub fn sort_by_deadline(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.deadline);
}

/// The instant a deadline elapses: midnight UTC of the deadline date
pub fn deadline_instant(deadline: NaiveDate) -> DateTime<Utc> {
    deadline.and_time(NaiveTime::MIN).and_utc()
}

/// Derive the pending/completed partitions for display
///
/// In order: filter by case-insensitive substring match of `search` in
/// the title (empty search keeps all), mark tasks whose deadline has
/// passed as late (monotonic: an already-late task is never un-marked,
/// a future deadline is never marked), then split by completion while
/// preserving relative order. Pure function; `now` is resampled by the
/// caller on every invocation.
pub fn derive(tasks: &[Task], search: &str, now: DateTime<Utc>) -> Partitions {
    let needle = search.to_lowercase();

    let mut partitions = Partitions::default();
    for task in tasks {
        if !needle.is_empty() && !task.title.to_lowercase().contains(&needle) {
            continue;
        }

        let mut task = task.clone();
        if now > deadline_instant(task.deadline) {
            task.late = true;
        }

        if task.completed {
            partitions.completed.push(task);
        } else {
            partitions.pending.push(task);
        }
    }

    partitions
}

/// Display format for deadlines: `DD/MM/YYYY`
pub fn format_deadline(deadline: NaiveDate) -> String {
    deadline.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn task(id: &str, title: &str, deadline: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: title.to_string(),
            deadline: date(deadline),
            completed,
            late: false,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        format!("{s}T12:00:00Z").parse().unwrap()
    }

    #[test]
    fn partitions_every_matching_task_exactly_once() {
        let tasks = vec![
            task("1", "Buy milk", "2024-01-01", false),
            task("2", "Write report", "2024-01-02", true),
            task("3", "Call mom", "2024-01-03", false),
        ];

        let parts = derive(&tasks, "", at("2023-12-01"));
        assert_eq!(parts.pending.len() + parts.completed.len(), tasks.len());
        assert_eq!(
            parts.pending.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
        assert_eq!(
            parts.completed.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["2"]
        );
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = vec![task("1", "Buy Milk", "2024-01-01", false)];

        let hit = derive(&tasks, "milk", at("2023-12-01"));
        assert_eq!(hit.pending.len(), 1);

        let miss = derive(&tasks, "xyz", at("2023-12-01"));
        assert!(miss.pending.is_empty());
        assert!(miss.completed.is_empty());
    }

    #[test]
    fn empty_search_keeps_all() {
        let tasks = vec![
            task("1", "a", "2024-01-01", false),
            task("2", "b", "2024-01-02", true),
        ];

        let parts = derive(&tasks, "", at("2023-12-01"));
        assert_eq!(parts.pending.len(), 1);
        assert_eq!(parts.completed.len(), 1);
    }

    #[test]
    fn past_deadline_marks_late() {
        let tasks = vec![
            task("1", "overdue", "2024-01-01", false),
            task("2", "upcoming", "2024-03-01", false),
        ];

        let parts = derive(&tasks, "", at("2024-02-01"));
        assert!(parts.pending[0].late);
        assert!(!parts.pending[1].late);
    }

    #[test]
    fn lateness_flips_at_midnight_of_deadline() {
        // Midnight of the deadline has passed by noon of the same day.
        let tasks = vec![task("1", "today", "2024-02-01", false)];
        let parts = derive(&tasks, "", at("2024-02-01"));
        assert!(parts.pending[0].late);

        // Just before midnight of the deadline it is still on time.
        let before: DateTime<Utc> = "2024-01-31T23:59:59Z".parse().unwrap();
        let parts = derive(&tasks, "", before);
        assert!(!parts.pending[0].late);
    }

    #[test]
    fn lateness_is_monotonic_in_time() {
        let tasks = vec![task("1", "a", "2024-01-15", false)];

        let t1 = at("2024-01-20");
        let t2 = at("2024-06-01");

        let first = derive(&tasks, "", t1);
        assert!(first.pending[0].late);

        let later = derive(&tasks, "", t2);
        assert!(later.pending[0].late);
    }

    #[test]
    fn previously_set_late_flag_is_preserved() {
        let mut stale = task("1", "a", "2099-01-01", false);
        stale.late = true;

        // A future deadline never clears an already-set flag.
        let parts = derive(&[stale], "", at("2024-01-01"));
        assert!(parts.pending[0].late);
    }

    #[test]
    fn completed_tasks_are_annotated_too() {
        let tasks = vec![task("1", "done late", "2024-01-01", true)];

        let parts = derive(&tasks, "", at("2024-02-01"));
        assert!(parts.completed[0].late);
    }

    #[test]
    fn sort_orders_ascending_by_deadline() {
        let mut tasks = vec![
            task("1", "c", "2024-03-01", false),
            task("2", "a", "2024-01-01", false),
            task("3", "b", "2024-02-01", false),
        ];

        sort_by_deadline(&mut tasks);

        let deadlines: Vec<_> = tasks.iter().map(|t| t.deadline.to_string()).collect();
        assert_eq!(deadlines, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }

    #[test]
    fn sort_keeps_fetch_order_on_ties() {
        let mut tasks = vec![
            task("first", "a", "2024-01-01", false),
            task("second", "b", "2024-01-01", false),
            task("third", "c", "2024-01-01", false),
        ];

        sort_by_deadline(&mut tasks);

        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn derive_preserves_sorted_order_within_partitions() {
        let mut tasks = vec![
            task("1", "z", "2024-03-01", false),
            task("2", "y", "2024-01-01", true),
            task("3", "x", "2024-02-01", false),
            task("4", "w", "2024-01-15", true),
        ];
        sort_by_deadline(&mut tasks);

        let parts = derive(&tasks, "", at("2023-12-01"));
        let pending: Vec<_> = parts.pending.iter().map(|t| t.id.as_str()).collect();
        let completed: Vec<_> = parts.completed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(pending, vec!["3", "1"]);
        assert_eq!(completed, vec!["2", "4"]);
    }

    #[test]
    fn new_task_validation() {
        let today = date("2024-06-01");

        assert!(validate_new_task("Buy milk", date("2024-06-01"), today).is_ok());
        assert!(validate_new_task("Buy milk", date("2024-07-01"), today).is_ok());

        let empty = validate_new_task("  ", date("2024-07-01"), today).expect_err("empty title");
        assert!(matches!(empty, Error::Validation(_)));

        let past = validate_new_task("x", date("2024-05-31"), today).expect_err("past deadline");
        assert!(matches!(past, Error::Validation(_)));
    }

    #[test]
    fn wire_format_round_trip() {
        let json = r#"{"id":"7","userId":"u1","title":"Buy milk","deadline":"2024-03-01","completed":false}"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.deadline, date("2024-03-01"));
        assert!(!parsed.late);

        // late never goes back out
        let out = serde_json::to_value(&parsed).unwrap();
        assert!(out.get("late").is_none());
        assert_eq!(out["userId"], "u1");
        assert_eq!(out["deadline"], "2024-03-01");
    }

    #[test]
    fn display_format_reverses_segments() {
        assert_eq!(format_deadline(date("2024-03-01")), "01/03/2024");
    }
}
