use std::collections::HashMap;

use sqlx::PgPool;

use crate::dto::question_dto::{
    CreateQuestionPayload, QuestionListItem, UpdateQuestionPayload,
};
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::question_option::QuestionOption;
use crate::models::question_type::QuestionType;
use crate::services::common::{self, AdminFlag, DependentTable};

/// Child tables consulted before a question's flags may change.
const ANSWER_GUARD: DependentTable = DependentTable {
    table: "user_question_answers",
    fk_column: "question_id",
    label: "user answers",
};

#[derive(Clone)]
pub struct QuestionService {
    pool: PgPool,
    page_size: i64,
}

pub struct QuestionSearch {
    pub items: Vec<QuestionListItem>,
    pub total: i64,
}

impl QuestionService {
    pub fn new(pool: PgPool, page_size: i64) -> Self {
        Self { pool, page_size }
    }

    /// Case-insensitive duplicate-name guard over non-deleted rows. The
    /// update path passes its own id so the row does not collide with itself.
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM questions
                WHERE LOWER(name) = LOWER($1)
                  AND deleted = false
                  AND ($2::int IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn ensure_name_available(&self, name: &str, exclude_id: Option<i32>) -> Result<()> {
        if self.name_exists(name, exclude_id).await? {
            return Err(Error::Conflict(format!(
                "Input Error: Name \"{}\" already exists",
                name
            )));
        }
        Ok(())
    }

    pub async fn create(&self, payload: CreateQuestionPayload) -> Result<Question> {
        let name = payload.name.trim().to_string();
        let question_type_id = payload
            .question_type_id
            .ok_or_else(|| Error::BadRequest("Input Error: questionTypeId is invalid".into()))?;

        self.ensure_name_available(&name, None).await?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (name, question_type_id, profile_display_name, type)
            VALUES ($1, $2, $3, COALESCE($4, 'normal'))
            RETURNING *
            "#,
        )
        .bind(&name)
        .bind(question_type_id)
        .bind(&payload.profile_display_name)
        .bind(&payload.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_write_error(err, &name))?;

        Ok(question)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Question> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Question with id {} not found", id)))
    }

    pub async fn options_for(&self, question_id: i32) -> Result<Vec<QuestionOption>> {
        let options = sqlx::query_as::<_, QuestionOption>(
            r#"
            SELECT * FROM question_options
            WHERE question_id = $1 AND deleted = false
            ORDER BY rank ASC, id ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn count_options(&self, question_id: i32) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM question_options WHERE question_id = $1")
                .bind(question_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Paginated keyword search over active, non-deleted questions, with the
    /// question type and options attached to each row.
    pub async fn search(&self, keyword: &str, page_index: i64) -> Result<QuestionSearch> {
        let page = page_index.max(1);
        let offset = (page - 1) * self.page_size;
        let pattern = format!("%{}%", keyword.to_lowercase());

        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT * FROM questions
            WHERE deleted = false AND activated = true AND LOWER(name) LIKE $1
            ORDER BY rank ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(self.page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM questions
            WHERE deleted = false AND activated = true AND LOWER(name) LIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let question_ids: Vec<i32> = questions.iter().map(|q| q.id).collect();
        let type_ids: Vec<i32> = questions.iter().filter_map(|q| q.question_type_id).collect();

        let mut options_by_question: HashMap<i32, Vec<QuestionOption>> = HashMap::new();
        if !question_ids.is_empty() {
            let options = sqlx::query_as::<_, QuestionOption>(
                r#"
                SELECT * FROM question_options
                WHERE question_id = ANY($1) AND deleted = false
                ORDER BY rank ASC, id ASC
                "#,
            )
            .bind(&question_ids)
            .fetch_all(&self.pool)
            .await?;
            for option in options {
                options_by_question
                    .entry(option.question_id)
                    .or_default()
                    .push(option);
            }
        }

        let mut types_by_id: HashMap<i32, QuestionType> = HashMap::new();
        if !type_ids.is_empty() {
            let types = sqlx::query_as::<_, QuestionType>(
                "SELECT * FROM question_types WHERE id = ANY($1)",
            )
            .bind(&type_ids)
            .fetch_all(&self.pool)
            .await?;
            for question_type in types {
                types_by_id.insert(question_type.id, question_type);
            }
        }

        let items = questions
            .into_iter()
            .map(|question| {
                let question_type = question
                    .question_type_id
                    .and_then(|id| types_by_id.get(&id).cloned())
                    .map(Into::into);
                let question_options = options_by_question
                    .remove(&question.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect();
                QuestionListItem {
                    question,
                    question_type,
                    question_options,
                }
            })
            .collect();

        Ok(QuestionSearch { items, total })
    }

    pub async fn update(&self, payload: UpdateQuestionPayload) -> Result<Question> {
        let existing = self.get_by_id(payload.id).await?;

        let name = payload.name.trim().to_string();
        self.ensure_name_available(&name, Some(payload.id)).await?;

        // The type of a question is frozen once options hang off it.
        if payload.question_type_id != existing.question_type_id
            && self.count_options(payload.id).await? > 0
        {
            return Err(Error::Conflict(
                "Error: One or more possible question options exist".into(),
            ));
        }

        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET name = $2,
                profile_display_name = $3,
                question_type_id = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(payload.id)
        .bind(&name)
        .bind(&payload.profile_display_name)
        .bind(payload.question_type_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_write_error(err, &name))?;

        Ok(question)
    }

    /// Flips `activated`, refused while user answers reference the question.
    pub async fn toggle_activated(&self, id: i32) -> Result<Question> {
        common::toggle_flag(&self.pool, "questions", AdminFlag::Activated, id, &[ANSWER_GUARD])
            .await
    }

    /// Flips `deleted` (soft delete / restore), same dependent-row guard.
    pub async fn toggle_deleted(&self, id: i32) -> Result<Question> {
        common::toggle_flag(&self.pool, "questions", AdminFlag::Deleted, id, &[ANSWER_GUARD])
            .await
    }
}

/// Maps constraint violations surfaced by the database to the admin
/// messages: an unknown type id trips the foreign key, a concurrent insert
/// of the same name trips the partial unique index.
fn map_write_error(err: sqlx::Error, name: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return Error::BadRequest("Input Error: questionTypeId is invalid".into());
        }
        if db_err.is_unique_violation() {
            return Error::Conflict(format!("Input Error: Name \"{}\" already exists", name));
        }
    }
    err.into()
}
