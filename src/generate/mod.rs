use crate::config::Config;
use crate::errors::GenerateError;
use crate::fetch::SourceFetcher;
use crate::prompt;
use crate::provider::openai::OpenAiProvider;
use crate::provider::DynProvider;
use crate::wire::{parse_test_cases, TestCase};

/// Orchestrates one generation run: fetch the source, build the prompt, call
/// the model, validate the reply. Strictly linear, no state across calls, any
/// failure aborts the whole run.
pub struct TestCaseGenerator {
    fetcher: SourceFetcher,
    provider: DynProvider,
}

impl TestCaseGenerator {
    /// Fails with a configuration error when the API key is absent, so a
    /// misconfigured deployment is rejected at construction rather than on the
    /// first request.
    pub fn new(cfg: &Config) -> Result<Self, GenerateError> {
        if cfg.api_key.trim().is_empty() {
            return Err(GenerateError::Config(
                "OpenAI API key is not set; export OPENAI_API_KEY".into(),
            ));
        }
        Ok(Self {
            fetcher: SourceFetcher::new(cfg.fetch_timeout_secs),
            provider: Box::new(OpenAiProvider::new(cfg.api_key.clone(), cfg.model.clone())),
        })
    }

    /// Seam for tests: swap in a stub provider while keeping the real fetcher.
    pub fn from_parts(fetcher: SourceFetcher, provider: DynProvider) -> Self {
        Self { fetcher, provider }
    }

    pub async fn generate(
        &self,
        source_url: &str,
        context: &str,
    ) -> Result<Vec<TestCase>, GenerateError> {
        if source_url.is_empty() {
            return Err(GenerateError::InvalidInput(
                "source_url must not be empty".into(),
            ));
        }

        let source_text = self.fetcher.fetch(source_url).await?;
        let user_prompt = prompt::build_user_prompt(source_url, &source_text, context);

        tracing::info!(url = %source_url, source_chars = source_text.chars().count(), "generating test cases");

        let content = self
            .provider
            .complete(prompt::system_prompt(), &user_prompt)
            .await?;

        if content.trim().is_empty() {
            return Err(GenerateError::Generation(
                "model returned an empty response".into(),
            ));
        }

        let cases = parse_test_cases(&content)?;
        tracing::info!(count = cases.len(), "generation complete");
        Ok(cases)
    }
}
