use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{CreateSeasonInput, Season};

#[derive(Clone)]
pub struct SeasonRepository {
    pool: PgPool,
}

impl SeasonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_season(
        &self,
        club_id: Uuid,
        request: &CreateSeasonInput,
    ) -> Result<Season, sqlx::Error> {
        sqlx::query_as::<_, Season>(
            r#"
            INSERT INTO
                seasons (name, start_date, end_date, active, club_id)
            VALUES
                ($1, $2, $3, $4, $5)
            RETURNING
                *
            "#,
        )
        .bind(&request.name)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.active.unwrap_or(true))
        .bind(club_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_for_club(&self, club_id: Uuid) -> Result<Vec<Season>, sqlx::Error> {
        sqlx::query_as::<_, Season>(
            "SELECT * FROM seasons WHERE club_id = $1 ORDER BY created_at DESC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await
    }
}
