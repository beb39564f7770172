use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

async fn send_json(app: &Router, method: &str, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value: JsonValue = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

async fn send_get(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value: JsonValue = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn question_admin_api_end_to_end() {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping question_admin_api_end_to_end");
        return;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("PAGE_SIZE", "10");

    questions_backend::config::init_config().expect("init config");

    let pool = questions_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    sqlx::query(
        "TRUNCATE user_question_answers, question_options, questions, question_types RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .expect("clean tables");

    let app_state = questions_backend::AppState::new(pool.clone());
    let app = Router::new()
        .route("/health", get(questions_backend::routes::health::health))
        .route(
            "/api/admin/questions",
            post(questions_backend::routes::question::add),
        )
        .route(
            "/api/admin/questions/list",
            post(questions_backend::routes::question::list),
        )
        .route(
            "/api/admin/questions/get",
            post(questions_backend::routes::question::get_by_id),
        )
        .route(
            "/api/admin/questions/update",
            post(questions_backend::routes::question::update),
        )
        .route(
            "/api/admin/question-types",
            get(questions_backend::routes::question::get_all_question_types),
        )
        .route(
            "/api/admin/questions/status",
            post(questions_backend::routes::question::status),
        )
        .route(
            "/api/admin/questions/delete",
            post(questions_backend::routes::question::deleted),
        )
        .with_state(app_state);

    // Empty type list answers 404 with the list-shaped failure envelope.
    let (code, body) = send_get(&app, "/api/admin/question-types").await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "0");
    assert_eq!(body["totalRecord"], 0);

    let (type_a,): (i32,) =
        sqlx::query_as("INSERT INTO question_types (name, type) VALUES ('Choice', 'choice') RETURNING id")
            .fetch_one(&pool)
            .await
            .expect("seed type a");
    let (type_b,): (i32,) =
        sqlx::query_as("INSERT INTO question_types (name, type) VALUES ('Scale', 'scale') RETURNING id")
            .fetch_one(&pool)
            .await
            .expect("seed type b");

    let (code, body) = send_get(&app, "/api/admin/question-types").await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "1");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["type"], "choice");

    // Create.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions",
        json!({
            "name": "Test Question",
            "questionTypeId": type_a,
            "profileDisplayName": "Test Profile Display Name",
            "type": "normal"
        }),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(body["status"], "1");
    assert_eq!(body["data"]["name"], "Test Question");
    assert_eq!(body["data"]["questionTypeId"], type_a);
    let question_id = body["data"]["id"].as_i64().unwrap();

    // Case-variant duplicate is rejected.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions",
        json!({ "name": "test question", "questionTypeId": type_a }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "0");
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    // Missing and unknown type ids are both invalid.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions",
        json!({ "name": "Another Question" }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("questionTypeId is invalid"));

    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions",
        json!({ "name": "Another Question", "questionTypeId": 999999 }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("questionTypeId is invalid"));

    // Keyword search finds the question, case-insensitively.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/list",
        json!({ "keyword": "TEST", "pageIndex": 1 }),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "1");
    assert_eq!(body["totalRecord"], 1);
    assert_eq!(body["data"][0]["name"], "Test Question");
    assert_eq!(body["data"][0]["questionType"]["id"], type_a);

    // A keyword matching nothing fails with an empty collection.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/list",
        json!({ "keyword": "zzz-no-match", "pageIndex": 1 }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "0");
    assert_eq!(body["totalRecord"], 0);
    assert_eq!(body["data"], json!([]));

    // Round-trip by id.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/get",
        json!({ "id": question_id }),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Test Question");
    assert_eq!(body["data"]["questionTypeId"], type_a);
    assert_eq!(body["data"]["status"], true);
    assert_eq!(body["data"]["questionOptions"], json!([]));

    let (code, _) = send_json(
        &app,
        "POST",
        "/api/admin/questions/get",
        json!({ "id": 999999 }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    // Plain update keeps the type.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/update",
        json!({
            "id": question_id,
            "name": "Renamed Question",
            "profileDisplayName": "Renamed",
            "questionTypeId": type_a
        }),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Renamed Question");

    // Once an option exists the type is frozen.
    sqlx::query("INSERT INTO question_options (question_id, name) VALUES ($1, 'Option A')")
        .bind(question_id as i32)
        .execute(&pool)
        .await
        .expect("seed option");

    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/update",
        json!({
            "id": question_id,
            "name": "Renamed Question",
            "questionTypeId": type_b
        }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("question options exist"));

    let (stored_type,): (Option<i32>,) =
        sqlx::query_as("SELECT question_type_id FROM questions WHERE id = $1")
            .bind(question_id as i32)
            .fetch_one(&pool)
            .await
            .expect("stored type");
    assert_eq!(stored_type, Some(type_a));

    // Dependent user answers block status and delete toggles.
    sqlx::query("INSERT INTO user_question_answers (user_id, question_id, answer) VALUES (1, $1, true)")
        .bind(question_id as i32)
        .execute(&pool)
        .await
        .expect("seed answer");

    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/status",
        json!({ "id": question_id }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("user answers"));

    let (code, _) = send_json(
        &app,
        "POST",
        "/api/admin/questions/delete",
        json!({ "id": question_id }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    sqlx::query("DELETE FROM user_question_answers WHERE question_id = $1")
        .bind(question_id as i32)
        .execute(&pool)
        .await
        .expect("clear answers");

    // Without answers the toggles flip the flags.
    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/status",
        json!({ "id": question_id }),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"]["activated"], false);

    let (code, body) = send_json(
        &app,
        "POST",
        "/api/admin/questions/delete",
        json!({ "id": question_id }),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], true);

    // Toggling an unknown id fails.
    let (code, _) = send_json(
        &app,
        "POST",
        "/api/admin/questions/status",
        json!({ "id": 999999 }),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}
