use crate::ports::{GenerationRequest, TextGenerator};
use llm_dns_domain::{
    chunk_text, decode_labels, sanitize_answer, Config, DomainError, LlmProvider, ParsedRequest,
    ResolutionOutcome, TxtQuery, DEFAULT_MAX_CHUNK_BYTES,
};
use std::sync::Arc;
use std::time::Instant;
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

/// Access-token gate in front of the generator.
#[derive(Debug, Clone, Default)]
pub enum AccessControl {
    #[default]
    Disabled,
    /// `secret` is `None` when enforcement is on but no server key is set.
    Required { secret: Option<Arc<str>> },
}

impl AccessControl {
    pub fn required(secret: Option<&str>) -> Self {
        Self::Required {
            secret: secret.map(Arc::from),
        }
    }
}

/// Immutable resolver configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub provider: LlmProvider,
    pub model: Option<Arc<str>>,
    pub system_prompt: Option<Arc<str>>,
    pub max_output_chars: usize,
    pub max_chunk_bytes: usize,
    pub access: AccessControl,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: None,
            system_prompt: None,
            max_output_chars: 800,
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            access: AccessControl::Disabled,
        }
    }
}

impl From<&Config> for ResolverSettings {
    fn from(config: &Config) -> Self {
        let access = if config.auth.require_api_key {
            AccessControl::required(config.auth.api_key.as_deref())
        } else {
            AccessControl::Disabled
        };

        Self {
            provider: config.llm.provider,
            model: config.llm.model.as_deref().map(Arc::from),
            system_prompt: config.llm.system_prompt.as_deref().map(Arc::from),
            max_output_chars: config.llm.max_output_chars,
            max_chunk_bytes: config.txt.max_chunk_bytes,
            access,
        }
    }
}

enum Gate {
    Open,
    Closed(ResolutionOutcome),
}

pub struct AnswerTxtQueryUseCase {
    generator: Arc<dyn TextGenerator>,
    settings: ResolverSettings,
}

impl AnswerTxtQueryUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: ResolverSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve one query. Protocol-level rejections come back as outcomes;
    /// only a failed generator call is returned as `Err`.
    pub async fn execute(&self, query: &TxtQuery) -> Result<ResolutionOutcome, DomainError> {
        if !query.is_txt() {
            debug!(record_type = %query.record_type, "Rejecting non-TXT query");
            return Ok(ResolutionOutcome::NotImplemented);
        }

        let parsed = decode_labels(query.labels());

        if let Gate::Closed(outcome) = self.check_access(&parsed) {
            return Ok(outcome);
        }

        let start = Instant::now();
        let request = GenerationRequest {
            prompt: parsed.question.clone(),
            provider: self.settings.provider,
            model: self.settings.model.clone(),
            system_prompt: self.settings.system_prompt.clone(),
        };

        let raw = self.generator.generate(&request).await?;
        let answer = sanitize_answer(&raw, self.settings.max_output_chars);
        let chunks = chunk_text(&answer, self.settings.max_chunk_bytes);

        info!(
            question = %parsed.question,
            provider = %self.settings.provider,
            answer_chars = answer.chars().count(),
            chunks = chunks.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Answered TXT query"
        );

        Ok(ResolutionOutcome::Answer(chunks))
    }

    fn check_access(&self, parsed: &ParsedRequest) -> Gate {
        let secret = match &self.settings.access {
            AccessControl::Disabled => return Gate::Open,
            AccessControl::Required { secret: None } => {
                warn!("API key required but DNS_API_KEY is not configured");
                return Gate::Closed(ResolutionOutcome::ServerFailure);
            }
            AccessControl::Required {
                secret: Some(secret),
            } => secret,
        };

        let provided = parsed.access_token.as_deref().unwrap_or_default();
        let matches = parsed.access_token.is_some()
            && bool::from(provided.as_bytes().ct_eq(secret.as_bytes()));

        if matches {
            Gate::Open
        } else {
            warn!(
                token_present = parsed.access_token.is_some(),
                "Access token rejected"
            );
            Gate::Closed(ResolutionOutcome::Refused)
        }
    }
}
