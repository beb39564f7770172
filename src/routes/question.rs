use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::envelope::send,
    dto::question_dto::{
        CreateQuestionPayload, QuestionDetailResponse, QuestionIdPayload, QuestionListPayload,
        QuestionTypeSummary, UpdateQuestionPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/questions",
    request_body = CreateQuestionPayload,
    responses(
        (status = 201, description = "Question created successfully"),
        (status = 400, description = "Validation or business-rule failure")
    )
)]
#[axum::debug_handler]
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.create(payload).await?;
    Ok(send(StatusCode::CREATED, "Success", Some(question), None))
}

#[utoipa::path(
    post,
    path = "/api/admin/questions/list",
    request_body = QuestionListPayload,
    responses(
        (status = 200, description = "Matching questions with options and types"),
        (status = 400, description = "No records matched the keyword and page")
    )
)]
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Json(payload): Json<QuestionListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let result = state
        .question_service
        .search(&payload.keyword, payload.page_index)
        .await?;

    if result.items.is_empty() {
        let message = format!(
            "No records found for the keyword '{}' and pageIndex {}",
            payload.keyword, payload.page_index
        );
        return Ok(send(StatusCode::BAD_REQUEST, message, Some(vec![]), Some(0)));
    }

    Ok(send(
        StatusCode::OK,
        "Found",
        Some(result.items),
        Some(result.total),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/questions/get",
    request_body = QuestionIdPayload,
    responses(
        (status = 200, description = "Question with nested options"),
        (status = 400, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn get_by_id(
    State(state): State<AppState>,
    Json(payload): Json<QuestionIdPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.get_by_id(payload.id).await?;
    let options = state.question_service.options_for(payload.id).await?;
    let detail = QuestionDetailResponse::from_parts(question, options);
    Ok(send(StatusCode::OK, "Found", Some(detail), None))
}

#[utoipa::path(
    post,
    path = "/api/admin/questions/update",
    request_body = UpdateQuestionPayload,
    responses(
        (status = 201, description = "Question updated successfully"),
        (status = 400, description = "Validation or business-rule failure")
    )
)]
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.update(payload).await?;
    Ok(send(StatusCode::CREATED, "Success", Some(question), None))
}

#[utoipa::path(
    get,
    path = "/api/admin/question-types",
    responses(
        (status = 200, description = "Activated question types"),
        (status = 404, description = "No types could be found")
    )
)]
#[axum::debug_handler]
pub async fn get_all_question_types(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let types = state.question_type_service.list_activated().await?;

    if types.is_empty() {
        return Ok(send(
            StatusCode::NOT_FOUND,
            "No types could be found",
            Some(vec![]),
            Some(0),
        ));
    }

    let summaries: Vec<QuestionTypeSummary> = types.into_iter().map(Into::into).collect();
    Ok(send(StatusCode::OK, "Success", Some(summaries), None))
}

#[utoipa::path(
    post,
    path = "/api/admin/questions/status",
    request_body = QuestionIdPayload,
    responses(
        (status = 200, description = "Activated flag toggled"),
        (status = 400, description = "User answers reference the question")
    )
)]
#[axum::debug_handler]
pub async fn status(
    State(state): State<AppState>,
    Json(payload): Json<QuestionIdPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.toggle_activated(payload.id).await?;
    Ok(send(StatusCode::OK, "Success", Some(question), None))
}

#[utoipa::path(
    post,
    path = "/api/admin/questions/delete",
    request_body = QuestionIdPayload,
    responses(
        (status = 200, description = "Deleted flag toggled"),
        (status = 400, description = "User answers reference the question")
    )
)]
#[axum::debug_handler]
pub async fn deleted(
    State(state): State<AppState>,
    Json(payload): Json<QuestionIdPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.toggle_deleted(payload.id).await?;
    Ok(send(StatusCode::OK, "Success", Some(question), None))
}
