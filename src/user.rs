//! User model, credential matching, and registration validation
//!
//! Credentials are matched by exact string equality against the candidate
//! records the backend returns for a username/password query. The backend
//! stores and returns plaintext passwords; that contract is preserved
//! here, hashing belongs to the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Gender as the backend records it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

/// A user record as returned by the backend
///
/// `id` is assigned by the backend on registration and immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub gender: Gender,
}

/// Registration payload for `POST /users`
///
/// The password confirmation never reaches the wire; it is checked and
/// dropped during validation.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub gender: Gender,
}

/// Raw registration input before validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub gender: Gender,
}

/// Validate a registration and produce the wire payload
///
/// Required username and password, well-formed email, birthdate not in
/// the future, confirmation equal to the password.
pub fn validate_registration(input: &Registration, today: NaiveDate) -> Result<NewUser> {
    if input.username.trim().is_empty() {
        return Err(Error::Validation("username is required".to_string()));
    }
    if input.email.trim().is_empty() {
        return Err(Error::Validation("email is required".to_string()));
    }
    if !is_valid_email(&input.email) {
        return Err(Error::Validation(format!(
            "invalid email address '{}'",
            input.email
        )));
    }
    if input.birthdate > today {
        return Err(Error::Validation(
            "birthdate cannot be in the future".to_string(),
        ));
    }
    if input.password.is_empty() {
        return Err(Error::Validation("password is required".to_string()));
    }
    if input.confirm_password != input.password {
        return Err(Error::Validation(
            "password confirmation does not match".to_string(),
        ));
    }

    Ok(NewUser {
        username: input.username.clone(),
        password: input.password.clone(),
        email: input.email.clone(),
        birthdate: input.birthdate,
        gender: input.gender,
    })
}

/// Find the first candidate whose username and password both match exactly
///
/// The backend pre-filters candidates by the query, but that is not
/// assumed: every record is checked. `None` means authentication failed;
/// the caller surfaces the generic invalid-credentials error.
pub fn match_credentials<'a>(
    candidates: &'a [User],
    username: &str,
    password: &str,
) -> Option<&'a User> {
    candidates
        .iter()
        .find(|user| user.username == username && user.password == password)
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !domain.contains('@')
}
