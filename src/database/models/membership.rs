use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::club::Club;
use super::user::UserRole;

/// Membership row joining a user to a club. At most one row per
/// (user, club) pair, enforced by the store's unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub role: ClubRole,
    pub joined_at: DateTime<Utc>,
}

/// Role scoped to one club, carried on the membership row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClubRole {
    Owner,
    Manager,
    Coach,
    Member,
}

impl ClubRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Owner => "OWNER",
            ClubRole::Manager => "MANAGER",
            ClubRole::Coach => "COACH",
            ClubRole::Member => "MEMBER",
        }
    }
}

impl sqlx::Type<sqlx::Postgres> for ClubRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for ClubRole {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ClubRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        s.parse().map_err(Into::into)
    }
}

impl Default for ClubRole {
    fn default() -> Self {
        ClubRole::Member
    }
}

impl std::fmt::Display for ClubRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ClubRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OWNER" => Ok(ClubRole::Owner),
            "MANAGER" => Ok(ClubRole::Manager),
            "COACH" => Ok(ClubRole::Coach),
            "MEMBER" => Ok(ClubRole::Member),
            _ => Err(format!("Invalid ClubRole: {}", s)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberInput {
    pub user_id: Uuid,
    pub role: ClubRole,
}

/// One row of a club's member list: the membership plus the joined user's
/// public fields.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub club_role: ClubRole,
    pub joined_at: DateTime<Utc>,
}

/// One of the caller's memberships with the club it grants access to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClub {
    pub club: Club,
    pub role: ClubRole,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_role_round_trips_through_strings() {
        for role in [
            ClubRole::Owner,
            ClubRole::Manager,
            ClubRole::Coach,
            ClubRole::Member,
        ] {
            assert_eq!(role.as_str().parse::<ClubRole>().unwrap(), role);
        }
        assert!("ADMIN".parse::<ClubRole>().is_err());
    }

    #[test]
    fn add_member_input_rejects_unknown_roles() {
        let ok: Result<AddMemberInput, _> = serde_json::from_str(
            r#"{"userId":"7b1c9f6e-3a1d-4b6e-9d1c-112233445566","role":"COACH"}"#,
        );
        assert!(ok.is_ok());

        let bad: Result<AddMemberInput, _> = serde_json::from_str(
            r#"{"userId":"7b1c9f6e-3a1d-4b6e-9d1c-112233445566","role":"ADMIN"}"#,
        );
        assert!(bad.is_err());
    }
}
