pub mod common;
pub mod question_service;
pub mod question_type_service;
