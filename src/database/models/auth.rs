use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::club::Club;
use super::user::{UserInfo, UserRole};
use crate::error::AppError;

const PASSWORD_MIN_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to CLIENT when omitted.
    pub role: Option<UserRole>,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if !email_regex().is_match(&self.email) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                PASSWORD_MIN_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
    /// The user's stored default club, when one is set and still exists.
    pub default_club: Option<Club>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDefaultClubInput {
    pub club_id: Option<uuid::Uuid>,
}
