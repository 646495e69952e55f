//! tdo - Command-line To-Do Client Library
//!
//! This library provides the core functionality for the tdo CLI tool,
//! a personal to-do list client against a REST backend.
//!
//! # Core Concepts
//!
//! - **Session**: the single currently authenticated user, persisted
//!   across invocations through the local store
//! - **Tasks**: deadline-dated items owned by a user, fetched in full from
//!   the backend and re-fetched after every mutation
//! - **Derivation**: pure computation turning raw tasks plus search text
//!   and the current clock into pending/completed partitions with
//!   lateness flags
//! - **Credential matching**: exact-match scan over candidate users
//!   returned by the backend
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output formatting
//! - `api`: HTTP client for the user and task endpoints
//! - `session`: Session context backed by the local store
//! - `storage`: Key-prefixed local key-value store
//! - `task`: Task model, sorting, and the list derivation engine
//! - `user`: User model, credential matching, registration validation

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod storage;
pub mod task;
pub mod user;

pub use error::{Error, Result};
