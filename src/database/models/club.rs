use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::error::AppError;

pub const SHORT_NAME_MAX_LEN: usize = 10;

fn color_regex() -> &'static Regex {
    static COLOR_RE: OnceLock<Regex> = OnceLock::new();
    COLOR_RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap())
}

/// A theme color must be a `#` followed by exactly six hex digits. The value
/// is stored as submitted, casing included.
pub fn validate_color(field: &str, value: &str) -> Result<(), AppError> {
    if color_regex().is_match(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} must match #RRGGBB, got '{}'",
            field, value
        )))
    }
}

fn validate_short_name(value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::Validation("shortName must not be empty".to_string()));
    }
    if value.chars().count() > SHORT_NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "shortName must be at most {} characters",
            SHORT_NAME_MAX_LEN
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    /// Opaque client-encoded logo blob; the server never inspects it.
    pub image: Option<String>,
    pub foreground_color: String,
    pub background_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Club row plus its membership count, for list views.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    pub image: Option<String>,
    pub foreground_color: String,
    pub background_color: String,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubInput {
    pub name: String,
    pub short_name: String,
    pub image: Option<String>,
    pub foreground_color: String,
    pub background_color: String,
}

impl CreateClubInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        validate_short_name(&self.short_name)?;
        validate_color("foregroundColor", &self.foreground_color)?;
        validate_color("backgroundColor", &self.background_color)?;
        Ok(())
    }
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Partial update; absent fields keep their stored value. Validation runs on
/// every present field before anything is written.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubInput {
    pub name: Option<String>,
    pub short_name: Option<String>,
    /// `None` leaves the logo untouched, `Some(None)` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    pub foreground_color: Option<String>,
    pub background_color: Option<String>,
}

impl UpdateClubInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(AppError::Validation("name must not be empty".to_string()));
            }
        }
        if let Some(short_name) = &self.short_name {
            validate_short_name(short_name)?;
        }
        if let Some(color) = &self.foreground_color {
            validate_color("foregroundColor", color)?;
        }
        if let Some(color) = &self.background_color {
            validate_color("backgroundColor", color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(fg: &str, bg: &str, short_name: &str) -> CreateClubInput {
        CreateClubInput {
            name: "FC Test".to_string(),
            short_name: short_name.to_string(),
            image: None,
            foreground_color: fg.to_string(),
            background_color: bg.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_colors_either_case() {
        assert!(input("#FFFFFF", "#000000", "FCT").validate().is_ok());
        assert!(input("#a1b2c3", "#D4E5F6", "FCT").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_colors() {
        // Missing '#'
        assert!(input("FFFFFF", "#000000", "FCT").validate().is_err());
        // 5 and 7 hex digits
        assert!(input("#FFFFF", "#000000", "FCT").validate().is_err());
        assert!(input("#FFFFFFF", "#000000", "FCT").validate().is_err());
        // Non-hex characters
        assert!(input("#GGGGGG", "#000000", "FCT").validate().is_err());
    }

    #[test]
    fn rejects_oversized_short_name() {
        assert!(input("#FFFFFF", "#000000", "ABCDEFGHIJ").validate().is_ok());
        assert!(input("#FFFFFF", "#000000", "ABCDEFGHIJK").validate().is_err());
        assert!(input("#FFFFFF", "#000000", "").validate().is_err());
    }

    #[test]
    fn partial_update_validates_only_present_fields() {
        let update = UpdateClubInput {
            name: None,
            short_name: None,
            image: None,
            foreground_color: Some("#123ABC".to_string()),
            background_color: None,
        };
        assert!(update.validate().is_ok());

        let update = UpdateClubInput {
            name: None,
            short_name: None,
            image: None,
            foreground_color: Some("#123AB".to_string()),
            background_color: None,
        };
        assert!(update.validate().is_err());
    }
}
