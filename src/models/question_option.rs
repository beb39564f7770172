use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: i32,
    pub question_id: i32,
    pub name: String,
    pub image: Option<String>,
    pub activated: bool,
    pub deleted: bool,
    pub rank: Option<i32>,
}
