use sqlx::PgPool;

use crate::error::Result;
use crate::models::question_type::QuestionType;

#[derive(Clone)]
pub struct QuestionTypeService {
    pool: PgPool,
}

impl QuestionTypeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_activated(&self) -> Result<Vec<QuestionType>> {
        let types = sqlx::query_as::<_, QuestionType>(
            r#"
            SELECT * FROM question_types
            WHERE activated = true
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }
}
