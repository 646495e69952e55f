//! HTTP client for the user and task endpoints
//!
//! The backend is an external collaborator with a plain request/response
//! contract; calls are blocking and never retried. Any transport failure
//! or non-success status surfaces as an error for the caller to report.
//! After a mutation the prescribed way to resynchronize is a full
//! re-fetch through `list_tasks`, which also establishes the display
//! order (stable ascending by deadline).

use serde_json::json;
use tracing::debug;

use crate::error::{Error, Result};
use crate::task::{self, NewTask, Task};
use crate::user::{NewUser, User};

/// Client for the to-do REST backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (trailing slash tolerated)
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::agent(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /users?username=...&password=...` — candidate users for login
    ///
    /// The returned list is matched client-side; the backend pre-filter is
    /// not trusted to be exact.
    pub fn find_users(&self, username: &str, password: &str) -> Result<Vec<User>> {
        let path = "/users".to_string();
        debug!(%username, "GET {path}");
        let response = self
            .agent
            .get(&self.url(&path))
            .query("username", username)
            .query("password", password)
            .call()
            .map_err(|err| map_err(err, "GET", &path))?;
        Ok(response.into_json()?)
    }

    /// `POST /users` — register a new user, returns the created record
    pub fn register(&self, new_user: &NewUser) -> Result<User> {
        let path = "/users".to_string();
        debug!(username = %new_user.username, "POST {path}");
        let response = self
            .agent
            .post(&self.url(&path))
            .send_json(new_user)
            .map_err(|err| map_err(err, "POST", &path))?;
        Ok(response.into_json()?)
    }

    /// `GET /users/{userId}/todo` — the user's full task list
    ///
    /// Replaces any previously fetched collection; sorted here so every
    /// consumer sees the same fetch-time order.
    pub fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        let path = format!("/users/{user_id}/todo");
        debug!("GET {path}");
        let response = self
            .agent
            .get(&self.url(&path))
            .call()
            .map_err(|err| map_err(err, "GET", &path))?;
        let mut tasks: Vec<Task> = response.into_json()?;
        task::sort_by_deadline(&mut tasks);
        Ok(tasks)
    }

    /// `POST /users/{userId}/todo` — create a task (completed = false)
    pub fn create_task(&self, user_id: &str, new_task: &NewTask) -> Result<Task> {
        let path = format!("/users/{user_id}/todo");
        debug!(title = %new_task.title, "POST {path}");
        let body = json!({
            "title": new_task.title,
            "deadline": new_task.deadline,
            "userId": user_id,
            "completed": false,
        });
        let response = self
            .agent
            .post(&self.url(&path))
            .send_json(body)
            .map_err(|err| map_err(err, "POST", &path))?;
        Ok(response.into_json()?)
    }

    /// `PUT /users/{userId}/todo/{id}` — set the completion flag
    pub fn set_completed(&self, user_id: &str, task_id: &str, completed: bool) -> Result<()> {
        let path = format!("/users/{user_id}/todo/{task_id}");
        debug!(completed, "PUT {path}");
        self.agent
            .put(&self.url(&path))
            .send_json(json!({ "completed": completed }))
            .map_err(|err| map_err(err, "PUT", &path))?;
        Ok(())
    }

    /// `DELETE /users/{userId}/todo/{id}` — remove a task
    pub fn delete_task(&self, user_id: &str, task_id: &str) -> Result<()> {
        let path = format!("/users/{user_id}/todo/{task_id}");
        debug!("DELETE {path}");
        self.agent
            .delete(&self.url(&path))
            .call()
            .map_err(|err| map_err(err, "DELETE", &path))?;
        Ok(())
    }
}

fn map_err(err: ureq::Error, method: &'static str, path: &str) -> Error {
    match err {
        ureq::Error::Status(status, _) => Error::Api {
            method,
            path: path.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => Error::Transport(transport.to_string()),
    }
}
