use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub name: String,
    pub activated: bool,
    pub deleted: bool,
    pub question_type_id: Option<i32>,
    pub program_structure_definition_id: Option<i32>,
    pub profile_display_name: Option<String>,
    pub rank: Option<i32>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
