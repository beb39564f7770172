use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;
use crate::models::question_option::QuestionOption;
use crate::models::question_type::QuestionType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub question_type_id: Option<i32>,
    pub profile_display_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionPayload {
    #[validate(range(min = 1))]
    pub id: i32,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub profile_display_name: Option<String>,
    pub question_type_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListPayload {
    #[validate(length(min = 1, message = "keyword must not be empty"))]
    pub keyword: String,
    #[validate(range(min = 1))]
    pub page_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionIdPayload {
    #[validate(range(min = 1))]
    pub id: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptionSummary {
    pub id: i32,
    pub name: String,
}

impl From<QuestionOption> for QuestionOptionSummary {
    fn from(value: QuestionOption) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Projection used by get-by-id: `activated` is surfaced as `status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailResponse {
    pub id: i32,
    pub name: String,
    pub status: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub question_type_id: Option<i32>,
    pub question_options: Vec<QuestionOptionSummary>,
}

impl QuestionDetailResponse {
    pub fn from_parts(question: Question, options: Vec<QuestionOption>) -> Self {
        Self {
            id: question.id,
            name: question.name,
            status: question.activated,
            created_at: question.created_at,
            updated_at: question.updated_at,
            question_type_id: question.question_type_id,
            question_options: options.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTypeSummary {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<QuestionType> for QuestionTypeSummary {
    fn from(value: QuestionType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: value.kind,
        }
    }
}

/// One row of the admin question list: the question joined with its type
/// and its options.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListItem {
    #[serde(flatten)]
    pub question: Question,
    pub question_type: Option<QuestionTypeSummary>,
    pub question_options: Vec<QuestionOptionSummary>,
}
