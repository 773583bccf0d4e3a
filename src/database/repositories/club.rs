use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{
    default_season_name, Club, ClubSummary, CreateClubInput, Season, UpdateClubInput,
};

#[derive(Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a club together with its default season. Both writes run in a
    /// single transaction so a failure cannot leave a club without a season.
    pub async fn create_club(
        &self,
        request: &CreateClubInput,
    ) -> Result<(Club, Season), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let club = sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO
                clubs (name, short_name, image, foreground_color, background_color)
            VALUES
                ($1, $2, $3, $4, $5)
            RETURNING
                *
            "#,
        )
        .bind(&request.name)
        .bind(&request.short_name)
        .bind(&request.image)
        .bind(&request.foreground_color)
        .bind(&request.background_color)
        .fetch_one(&mut *tx)
        .await?;

        let now = Utc::now();
        let season = sqlx::query_as::<_, Season>(
            r#"
            INSERT INTO
                seasons (name, start_date, active, club_id)
            VALUES
                ($1, $2, TRUE, $3)
            RETURNING
                *
            "#,
        )
        .bind(default_season_name(now))
        .bind(now)
        .bind(club.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((club, season))
    }

    pub async fn find_by_id(&self, club_id: Uuid) -> Result<Option<Club>, sqlx::Error> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1")
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<ClubSummary>, sqlx::Error> {
        sqlx::query_as::<_, ClubSummary>(
            r#"
            SELECT
                c.*,
                (SELECT COUNT(*) FROM club_users cu WHERE cu.club_id = c.id) AS member_count
            FROM
                clubs c
            ORDER BY
                c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ClubSummary>, sqlx::Error> {
        sqlx::query_as::<_, ClubSummary>(
            r#"
            SELECT
                c.*,
                (SELECT COUNT(*) FROM club_users cu WHERE cu.club_id = c.id) AS member_count
            FROM
                clubs c
                JOIN club_users m ON c.id = m.club_id
            WHERE
                m.user_id = $1
            ORDER BY
                m.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Apply a partial update. Absent fields keep their stored value; a
    /// present-but-null image clears the logo.
    pub async fn update_club(
        &self,
        club_id: Uuid,
        request: &UpdateClubInput,
    ) -> Result<Option<Club>, sqlx::Error> {
        sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs
            SET
                name = COALESCE($1, name),
                short_name = COALESCE($2, short_name),
                image = CASE WHEN $3 THEN $4 ELSE image END,
                foreground_color = COALESCE($5, foreground_color),
                background_color = COALESCE($6, background_color),
                updated_at = NOW()
            WHERE
                id = $7
            RETURNING
                *
            "#,
        )
        .bind(&request.name)
        .bind(&request.short_name)
        .bind(request.image.is_some())
        .bind(request.image.clone().flatten())
        .bind(&request.foreground_color)
        .bind(&request.background_color)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Seasons and membership rows go with the club via ON DELETE CASCADE.
    pub async fn delete_club(&self, club_id: Uuid) -> Result<Option<()>, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(club_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(()))
    }
}
