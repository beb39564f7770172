pub mod envelope;
pub mod question_dto;
