pub mod question;
pub mod question_option;
pub mod question_type;
pub mod user_answer;
