use anyhow::{bail, Result};
use tracing::info;

use super::client::LlmClient;
use super::client::MockLlmClient;
use super::client_impl::OpenAIClient;
use crate::config::Config;

/// Create an LLM client based on configuration
pub fn create_client(config: &Config, dry_run: bool) -> Result<Box<dyn LlmClient>> {
    if dry_run {
        info!("Dry run: using mock completion client");
        return Ok(Box::new(MockLlmClient::new()));
    }

    let llm = &config.llm;

    match llm.provider.as_str() {
        "openai" => {
            let api_key = config.get_api_key()?;
            let client = match &llm.base_url {
                Some(base_url) => OpenAIClient::with_base_url(
                    api_key,
                    llm.model.clone(),
                    base_url.clone(),
                    llm.max_tokens,
                    llm.timeout_secs,
                )?,
                None => OpenAIClient::new(api_key, llm.model.clone(), llm.max_tokens, llm.timeout_secs)?,
            };
            Ok(Box::new(client.with_temperature(llm.temperature)))
        }

        "openai-compatible" => {
            let api_key = config.get_api_key()?;
            let base_url = llm
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());

            Ok(Box::new(
                OpenAIClient::with_base_url(
                    api_key,
                    llm.model.clone(),
                    base_url,
                    llm.max_tokens,
                    llm.timeout_secs,
                )?
                .with_temperature(llm.temperature),
            ))
        }

        unknown => bail!("Unknown LLM provider: {}", unknown),
    }
}
