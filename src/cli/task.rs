//! Task commands: add, ls, done, reopen, rm
//!
//! Every mutation is followed by a full re-fetch of the user's list; the
//! backend owns the collection and incremental local updates are never
//! attempted.

use chrono::{NaiveDate, Utc};

use super::AppContext;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{self, Task};

/// One task as rendered in reports
///
/// Separate from the wire type so the derived `late` flag can appear in
/// JSON output without ever being serialized back to the backend.
#[derive(serde::Serialize)]
struct TaskRow {
    id: String,
    title: String,
    deadline: NaiveDate,
    completed: bool,
    late: bool,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            deadline: task.deadline,
            completed: task.completed,
            late: task.late,
        }
    }
}

fn human_line(task: &Task) -> String {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let late = if task.late { "  (late)" } else { "" };
    format!(
        "{marker} {}  {}{late}  #{}",
        task::format_deadline(task.deadline),
        task.title,
        task.id
    )
}

/// Options for the add command
pub struct AddOptions {
    pub title: String,
    pub deadline: NaiveDate,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct AddReport {
    id: String,
    title: String,
    deadline: NaiveDate,
    pending: usize,
    completed: usize,
}

pub fn run_add(ctx: AppContext, options: AddOptions) -> Result<()> {
    let user_id = ctx.session.require_user()?.id.clone();

    let new_task = task::validate_new_task(&options.title, options.deadline, Utc::now().date_naive())?;
    let created = ctx.api.create_task(&user_id, &new_task)?;

    // Resynchronize: the created task's position comes from a fresh list.
    let tasks = ctx.api.list_tasks(&user_id)?;
    let (pending, completed) = counts(&tasks);

    let report = AddReport {
        id: created.id.clone(),
        title: created.title.clone(),
        deadline: created.deadline,
        pending,
        completed,
    };

    let mut human = HumanOutput::new(format!("tdo task add: created {}", created.title));
    human.push_summary("id", created.id);
    human.push_summary("deadline", task::format_deadline(created.deadline));
    human.push_summary("pending", pending.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task add",
        &report,
        Some(&human),
    )
}

/// Options for the ls command
pub struct LsOptions {
    pub search: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct LsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    pending: Vec<TaskRow>,
    completed: Vec<TaskRow>,
}

pub fn run_ls(ctx: AppContext, options: LsOptions) -> Result<()> {
    let user_id = ctx.session.require_user()?.id.clone();

    let tasks = ctx.api.list_tasks(&user_id)?;
    let search = options.search.as_deref().unwrap_or("");
    let partitions = task::derive(&tasks, search, Utc::now());

    let report = LsReport {
        search: options.search.clone(),
        pending: partitions.pending.iter().map(TaskRow::from).collect(),
        completed: partitions.completed.iter().map(TaskRow::from).collect(),
    };

    let mut human = HumanOutput::new("tdo task ls");
    if !search.is_empty() {
        human.push_summary("search", search);
    }
    human.push_summary("pending", partitions.pending.len().to_string());
    human.push_summary("completed", partitions.completed.len().to_string());
    for task in partitions.pending.iter().chain(&partitions.completed) {
        human.push_detail(human_line(task));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task ls",
        &report,
        Some(&human),
    )
}

/// Options for the done/reopen commands
pub struct CompleteOptions {
    pub id: String,
    pub completed: bool,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct CompleteReport {
    id: String,
    completed: bool,
    pending: usize,
    completed_count: usize,
}

pub fn run_set_completed(ctx: AppContext, options: CompleteOptions) -> Result<()> {
    let user_id = ctx.session.require_user()?.id.clone();

    ctx.api
        .set_completed(&user_id, &options.id, options.completed)?;

    let tasks = ctx.api.list_tasks(&user_id)?;
    let (pending, completed) = counts(&tasks);

    let report = CompleteReport {
        id: options.id.clone(),
        completed: options.completed,
        pending,
        completed_count: completed,
    };

    let (command, verb) = if options.completed {
        ("task done", "completed")
    } else {
        ("task reopen", "reopened")
    };
    let mut human = HumanOutput::new(format!("tdo {command}: {verb} #{}", options.id));
    human.push_summary("pending", pending.to_string());
    human.push_summary("completed", completed.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        command,
        &report,
        Some(&human),
    )
}

/// Options for the rm command
pub struct RmOptions {
    pub id: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct RmReport {
    id: String,
    pending: usize,
    completed: usize,
}

pub fn run_rm(ctx: AppContext, options: RmOptions) -> Result<()> {
    let user_id = ctx.session.require_user()?.id.clone();

    ctx.api.delete_task(&user_id, &options.id)?;

    let tasks = ctx.api.list_tasks(&user_id)?;
    let (pending, completed) = counts(&tasks);

    let report = RmReport {
        id: options.id.clone(),
        pending,
        completed,
    };

    let mut human = HumanOutput::new(format!("tdo task rm: deleted #{}", options.id));
    human.push_summary("pending", pending.to_string());
    human.push_summary("completed", completed.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task rm",
        &report,
        Some(&human),
    )
}

fn counts(tasks: &[Task]) -> (usize, usize) {
    let completed = tasks.iter().filter(|task| task.completed).count();
    (tasks.len() - completed, completed)
}
