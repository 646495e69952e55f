//! Account commands: register, login, logout, whoami

use chrono::Utc;

use super::AppContext;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::user::{self, Gender, Registration};

/// Options for the register command
pub struct RegisterOptions {
    pub username: String,
    pub email: String,
    pub birthdate: chrono::NaiveDate,
    pub gender: Gender,
    pub password: String,
    pub confirm_password: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct RegisterReport {
    id: String,
    username: String,
    email: String,
}

pub fn run_register(ctx: AppContext, options: RegisterOptions) -> Result<()> {
    let input = Registration {
        username: options.username,
        password: options.password,
        confirm_password: options.confirm_password,
        email: options.email,
        birthdate: options.birthdate,
        gender: options.gender,
    };
    let payload = user::validate_registration(&input, Utc::now().date_naive())?;

    let created = ctx.api.register(&payload)?;

    let report = RegisterReport {
        id: created.id.clone(),
        username: created.username.clone(),
        email: created.email.clone(),
    };

    let mut human = HumanOutput::new(format!("tdo register: created {}", created.username));
    human.push_summary("id", created.id);
    human.push_summary("email", created.email);
    human.push_next_step(format!("tdo login {}", created.username));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "register",
        &report,
        Some(&human),
    )
}

/// Options for the login command
pub struct LoginOptions {
    pub username: String,
    pub password: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct LoginReport {
    id: String,
    username: String,
}

pub fn run_login(mut ctx: AppContext, options: LoginOptions) -> Result<()> {
    let candidates = ctx.api.find_users(&options.username, &options.password)?;

    // One generic failure for unknown user and wrong password alike.
    let matched = user::match_credentials(&candidates, &options.username, &options.password)
        .cloned()
        .ok_or(Error::InvalidCredentials)?;

    let report = LoginReport {
        id: matched.id.clone(),
        username: matched.username.clone(),
    };

    ctx.session.login(matched)?;

    let mut human = HumanOutput::new(format!("tdo login: logged in as {}", report.username));
    human.push_summary("id", report.id.clone());
    human.push_next_step("tdo task ls".to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "login",
        &report,
        Some(&human),
    )
}

#[derive(serde::Serialize)]
struct LogoutReport {
    was_logged_in: bool,
}

pub fn run_logout(mut ctx: AppContext, json: bool, quiet: bool) -> Result<()> {
    let previous = ctx.session.current_user().map(|u| u.username.clone());
    ctx.session.logout()?;

    let report = LogoutReport {
        was_logged_in: previous.is_some(),
    };

    let header = match previous {
        Some(username) => format!("tdo logout: cleared session for {username}"),
        None => "tdo logout: no active session".to_string(),
    };
    let human = HumanOutput::new(header);

    emit_success(
        OutputOptions { json, quiet },
        "logout",
        &report,
        Some(&human),
    )
}

#[derive(serde::Serialize)]
struct WhoamiReport {
    id: String,
    username: String,
    email: String,
}

pub fn run_whoami(ctx: AppContext, json: bool, quiet: bool) -> Result<()> {
    let user = ctx.session.require_user()?;

    let report = WhoamiReport {
        id: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
    };

    let mut human = HumanOutput::new(format!("tdo whoami: {}", report.username));
    human.push_summary("id", report.id.clone());
    human.push_summary("email", report.email.clone());

    emit_success(
        OutputOptions { json, quiet },
        "whoami",
        &report,
        Some(&human),
    )
}
