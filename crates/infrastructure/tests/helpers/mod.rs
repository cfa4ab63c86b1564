mod mock_generator;
mod mock_llm_server;

pub use mock_generator::StaticGenerator;
pub use mock_llm_server::{CapturedRequest, MockLlmServer};
