#![allow(dead_code)]

use async_trait::async_trait;
use llm_dns_application::ports::{GenerationRequest, TextGenerator};
use llm_dns_domain::DomainError;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockTextGenerator {
    answer: Arc<Mutex<Result<String, DomainError>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::answering("42")
    }

    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Arc::new(Mutex::new(Ok(answer.to_string()))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            answer: Arc::new(Mutex::new(Err(error))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.lock().unwrap().clone()
    }
}
