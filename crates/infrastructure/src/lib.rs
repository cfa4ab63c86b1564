pub mod dns;
pub mod llm;
