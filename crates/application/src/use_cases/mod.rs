pub mod answer_txt_query;

pub use answer_txt_query::{AccessControl, AnswerTxtQueryUseCase, ResolverSettings};
