use axum::{http::StatusCode, response::Json};
use serde::Serialize;

/// Admin response envelope. `status` is `"1"` for 2xx responses and `"0"`
/// otherwise; `data` and `totalRecord` are present only when the operation
/// carries them.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "totalRecord", skip_serializing_if = "Option::is_none")]
    pub total_record: Option<i64>,
}

/// Builds the envelope for a given HTTP status, mirroring the common
/// `sendResponse(status, message, data, totalRecord)` shape.
pub fn send<T: Serialize>(
    code: StatusCode,
    message: impl Into<String>,
    data: Option<T>,
    total_record: Option<i64>,
) -> (StatusCode, Json<Envelope<T>>) {
    let envelope = Envelope {
        status: if code.is_success() { "1" } else { "0" },
        message: message.into(),
        data,
        total_record,
    };
    (code, Json(envelope))
}
