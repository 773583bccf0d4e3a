use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Club, ClubRole, MemberInfo, Membership, UserClub};

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_membership(
        &self,
        user_id: Uuid,
        club_id: Uuid,
    ) -> Result<Option<Membership>, sqlx::Error> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM club_users WHERE user_id = $1 AND club_id = $2",
        )
        .bind(user_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a membership row. The unique (user_id, club_id) constraint
    /// rejects a racing duplicate; callers should pre-check and surface the
    /// constraint hit as a conflict either way.
    pub async fn add_member(
        &self,
        club_id: Uuid,
        user_id: Uuid,
        role: ClubRole,
    ) -> Result<Membership, sqlx::Error> {
        sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO
                club_users (user_id, club_id, role)
            VALUES
                ($1, $2, $3)
            RETURNING
                *
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn remove_member(
        &self,
        club_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<()>, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM club_users WHERE club_id = $1 AND user_id = $2")
                .bind(club_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(()))
    }

    pub async fn list_members(&self, club_id: Uuid) -> Result<Vec<MemberInfo>, sqlx::Error> {
        sqlx::query_as::<_, MemberInfo>(
            r#"
            SELECT
                u.id AS user_id,
                u.name,
                u.email,
                u.role,
                u.active,
                cu.role AS club_role,
                cu.joined_at
            FROM
                users u
                JOIN club_users cu ON u.id = cu.user_id
            WHERE
                cu.club_id = $1
            ORDER BY
                cu.joined_at DESC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await
    }

    /// The caller's memberships, club payload included, most recently joined
    /// first. The ordering feeds the last resolution fallback and is
    /// deliberate: joined_at descending, not club name.
    pub async fn list_clubs_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserClub>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MembershipWithClubRow>(
            r#"
            SELECT
                c.id,
                c.name,
                c.short_name,
                c.image,
                c.foreground_color,
                c.background_color,
                c.created_at,
                c.updated_at,
                cu.role AS club_role,
                cu.joined_at
            FROM
                clubs c
                JOIN club_users cu ON c.id = cu.club_id
            WHERE
                cu.user_id = $1
            ORDER BY
                cu.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserClub::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct MembershipWithClubRow {
    id: Uuid,
    name: String,
    short_name: String,
    image: Option<String>,
    foreground_color: String,
    background_color: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    club_role: ClubRole,
    joined_at: chrono::DateTime<chrono::Utc>,
}

impl From<MembershipWithClubRow> for UserClub {
    fn from(row: MembershipWithClubRow) -> Self {
        UserClub {
            club: Club {
                id: row.id,
                name: row.name,
                short_name: row.short_name,
                image: row.image,
                foreground_color: row.foreground_color,
                background_color: row.background_color,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            role: row.club_role,
            joined_at: row.joined_at,
        }
    }
}
