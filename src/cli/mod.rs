//! Command-line interface for tdo
//!
//! This module defines the CLI structure using clap derive macros.
//! Account and task commands are defined in their own submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::config;
use crate::error::Result;
use crate::session::Session;
use crate::storage::Store;
use crate::user::Gender;

mod account;
mod task;

/// tdo - To-Do Client
///
/// A CLI for a personal to-do list backed by a REST service: register,
/// log in, and manage deadline-dated tasks.
#[derive(Parser, Debug)]
#[command(name = "tdo")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the backend API (overrides config)
    #[arg(long, global = true, env = "TDO_API_URL")]
    pub api_url: Option<String>,

    /// Directory for the local store (overrides config)
    #[arg(long, global = true, env = "TDO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account on the backend
    Register {
        /// Username to register
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Birthdate (YYYY-MM-DD, not in the future)
        #[arg(long)]
        birthdate: chrono::NaiveDate,

        /// Gender
        #[arg(long, value_enum)]
        gender: Gender,

        /// Password
        #[arg(long)]
        password: String,

        /// Password confirmation (must equal --password)
        #[arg(long)]
        confirm_password: String,
    },

    /// Log in and persist the session
    Login {
        /// Username
        username: String,

        /// Password
        #[arg(long)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a new task
    Add {
        /// Task title
        title: String,

        /// Deadline (YYYY-MM-DD, not in the past)
        #[arg(long)]
        deadline: chrono::NaiveDate,
    },

    /// List tasks, split into pending and completed
    Ls {
        /// Case-insensitive substring filter on the title
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Mark a task as completed
    Done {
        /// Task id
        id: String,
    },

    /// Revert a completed task to pending
    Reopen {
        /// Task id
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },
}

/// Per-invocation application context
///
/// Built once at startup: configuration, the local store, the restored
/// session, and the API client. Commands receive this instead of
/// touching global state.
pub struct AppContext {
    pub session: Session,
    pub api: ApiClient,
}

impl AppContext {
    /// Initialize the context from config plus per-invocation overrides
    pub fn init(api_url: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = config::load_default()?;
        let data_dir = config::resolve_data_dir(data_dir, &config)?;
        let store = Store::open(data_dir)?;
        let session = Session::load(store)?;

        let base_url = api_url.unwrap_or(config.api.base_url);
        let api = ApiClient::new(&base_url);

        Ok(Self { session, api })
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = AppContext::init(self.api_url, self.data_dir)?;

        match self.command {
            Commands::Register {
                username,
                email,
                birthdate,
                gender,
                password,
                confirm_password,
            } => account::run_register(
                ctx,
                account::RegisterOptions {
                    username,
                    email,
                    birthdate,
                    gender,
                    password,
                    confirm_password,
                    json: self.json,
                    quiet: self.quiet,
                },
            ),
            Commands::Login { username, password } => account::run_login(
                ctx,
                account::LoginOptions {
                    username,
                    password,
                    json: self.json,
                    quiet: self.quiet,
                },
            ),
            Commands::Logout => account::run_logout(ctx, self.json, self.quiet),
            Commands::Whoami => account::run_whoami(ctx, self.json, self.quiet),
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add { title, deadline } => task::run_add(
                    ctx,
                    task::AddOptions {
                        title,
                        deadline,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
                TaskCommands::Ls { search } => task::run_ls(
                    ctx,
                    task::LsOptions {
                        search,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
                TaskCommands::Done { id } => task::run_set_completed(
                    ctx,
                    task::CompleteOptions {
                        id,
                        completed: true,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
                TaskCommands::Reopen { id } => task::run_set_completed(
                    ctx,
                    task::CompleteOptions {
                        id,
                        completed: false,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
                TaskCommands::Rm { id } => task::run_rm(
                    ctx,
                    task::RmOptions {
                        id,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
            },
        }
    }
}
