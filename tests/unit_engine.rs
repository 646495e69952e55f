use chrono::{DateTime, Datelike, NaiveDate, Utc};

use tdo::task::{deadline_instant, derive, sort_by_deadline, Task};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn at(s: &str) -> DateTime<Utc> {
    format!("{s}T12:00:00Z").parse().unwrap()
}

fn fixture() -> Vec<Task> {
    let rows = [
        ("1", "Pay rent", "2024-01-01", false),
        ("2", "Buy milk", "2024-01-01", true),
        ("3", "Write report", "2024-02-15", false),
        ("4", "Call the dentist", "2024-03-01", true),
        ("5", "Renew passport", "2024-06-30", false),
        ("6", "Buy more milk", "2024-08-01", false),
    ];
    rows.iter()
        .map(|(id, title, deadline, completed)| Task {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: title.to_string(),
            deadline: date(deadline),
            completed: *completed,
            late: false,
        })
        .collect()
}

#[test]
fn every_task_lands_in_exactly_one_partition() {
    let tasks = fixture();
    let parts = derive(&tasks, "", at("2024-04-01"));

    let mut seen: Vec<&str> = parts
        .pending
        .iter()
        .chain(&parts.completed)
        .map(|t| t.id.as_str())
        .collect();
    seen.sort();

    let mut all: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    all.sort();
    assert_eq!(seen, all);

    assert!(parts.pending.iter().all(|t| !t.completed));
    assert!(parts.completed.iter().all(|t| t.completed));
}

#[test]
fn search_only_ever_narrows() {
    let tasks = fixture();
    let now = at("2024-04-01");

    let full = derive(&tasks, "", now);
    let narrowed = derive(&tasks, "milk", now);

    assert!(narrowed.pending.len() <= full.pending.len());
    assert!(narrowed.completed.len() <= full.completed.len());

    let titles: Vec<&str> = narrowed
        .pending
        .iter()
        .chain(&narrowed.completed)
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Buy more milk", "Buy milk"]);
}

#[test]
fn lateness_never_decreases_as_time_advances() {
    let tasks = fixture();
    let instants = ["2024-01-15", "2024-02-20", "2024-07-01", "2025-01-01"];

    let mut previous = 0usize;
    for instant in instants {
        let parts = derive(&tasks, "", at(instant));
        let late = parts
            .pending
            .iter()
            .chain(&parts.completed)
            .filter(|t| t.late)
            .count();
        assert!(late >= previous, "late count regressed at {instant}");
        previous = late;
    }
    assert_eq!(previous, tasks.len());
}

#[test]
fn deadline_instant_is_utc_midnight_of_the_date() {
    let instant = deadline_instant(date("2024-02-15"));
    assert_eq!(instant.to_rfc3339(), "2024-02-15T00:00:00+00:00");
    assert_eq!(instant.date_naive().day(), 15);
}

#[test]
fn partitions_inherit_the_fetch_ordering() {
    let mut tasks = fixture();
    tasks.reverse();
    sort_by_deadline(&mut tasks);

    let parts = derive(&tasks, "", at("2023-12-01"));

    let pending: Vec<_> = parts.pending.iter().map(|t| t.deadline).collect();
    let mut sorted = pending.clone();
    sorted.sort();
    assert_eq!(pending, sorted);

    let completed: Vec<_> = parts.completed.iter().map(|t| t.deadline).collect();
    let mut sorted = completed.clone();
    sorted.sort();
    assert_eq!(completed, sorted);
}

#[test]
fn derive_never_mutates_its_input() {
    let tasks = fixture();
    let before = tasks.clone();

    let _ = derive(&tasks, "milk", at("2025-01-01"));
    assert_eq!(tasks, before);
}
