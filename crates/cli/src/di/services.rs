use llm_dns_application::use_cases::{AccessControl, AnswerTxtQueryUseCase, ResolverSettings};
use llm_dns_domain::config::api_key_env_for;
use llm_dns_domain::Config;
use llm_dns_infrastructure::dns::DnsServerHandler;
use llm_dns_infrastructure::llm::ProviderRouter;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Services {
    pub handler: DnsServerHandler,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let router = ProviderRouter::from_config(&config.llm);
        if !router.supports(config.llm.provider) {
            anyhow::bail!(
                "Provider '{}' is not available, set {}",
                config.llm.provider,
                api_key_env_for(config.llm.provider)
            );
        }

        let settings = ResolverSettings::from(config);
        match &settings.access {
            AccessControl::Disabled => info!("Access token check disabled"),
            AccessControl::Required { secret: Some(_) } => info!("Access token check enabled"),
            AccessControl::Required { secret: None } => {
                warn!("Access token check enabled but DNS_API_KEY is unset, queries will SERVFAIL");
            }
        }

        let use_case = Arc::new(AnswerTxtQueryUseCase::new(Arc::new(router), settings));
        let handler = DnsServerHandler::new(use_case, config.txt.ttl);

        Ok(Self { handler })
    }
}
