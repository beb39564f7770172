use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use questions_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let admin_api = Router::new()
        .route(
            "/api/admin/questions",
            post(routes::question::add),
        )
        .route(
            "/api/admin/questions/list",
            post(routes::question::list),
        )
        .route(
            "/api/admin/questions/get",
            post(routes::question::get_by_id),
        )
        .route(
            "/api/admin/questions/update",
            post(routes::question::update),
        )
        .route(
            "/api/admin/question-types",
            get(routes::question::get_all_question_types),
        )
        .route(
            "/api/admin/questions/status",
            post(routes::question::status),
        )
        .route(
            "/api/admin/questions/delete",
            post(routes::question::deleted),
        );

    let app = base_routes
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
