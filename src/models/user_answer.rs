use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user answer rows. This is the usage table consulted before a
/// question's status or deleted flag may be toggled.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserQuestionAnswer {
    pub id: i32,
    pub user_id: i32,
    pub question_id: i32,
    pub question_option_id: Option<i32>,
    pub program_structure_option_id: Option<i32>,
    pub answer: bool,
    pub complexity_id: Option<i32>,
}
