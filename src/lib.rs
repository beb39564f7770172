pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    question_service::QuestionService, question_type_service::QuestionTypeService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub question_service: QuestionService,
    pub question_type_service: QuestionTypeService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let question_service = QuestionService::new(pool.clone(), config.page_size);
        let question_type_service = QuestionTypeService::new(pool.clone());

        Self {
            pool,
            question_service,
            question_type_service,
        }
    }
}
