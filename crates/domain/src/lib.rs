//! LLM DNS Domain Layer
pub mod answer;
pub mod config;
pub mod errors;
pub mod llm_provider;
pub mod question;
pub mod record_type;
pub mod resolution;
pub mod txt_chunk;
pub mod txt_query;

pub use answer::sanitize_answer;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use llm_provider::LlmProvider;
pub use question::{decode_labels, ParsedRequest};
pub use record_type::RecordType;
pub use resolution::ResolutionOutcome;
pub use txt_chunk::{chunk_text, TxtChunkSet, DEFAULT_MAX_CHUNK_BYTES};
pub use txt_query::TxtQuery;
