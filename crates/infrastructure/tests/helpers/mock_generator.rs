#![allow(dead_code)]
use async_trait::async_trait;
use llm_dns_application::ports::{GenerationRequest, TextGenerator};
use llm_dns_domain::DomainError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Answers every question with a fixed text, or fails when `answer` is `None`.
pub struct StaticGenerator {
    answer: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticGenerator {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() && request.prompt.contains("slow") {
            tokio::time::sleep(self.delay).await;
        }
        self.answer
            .clone()
            .ok_or_else(|| DomainError::ProviderStatus {
                provider: request.provider.to_string(),
                status: 503,
                message: "unavailable".to_string(),
            })
    }
}
