use std::time::Duration;

use reqwest::Client;

use crate::errors::GenerateError;

/// Hard cap on fetched text, to bound the prompt size downstream.
pub const MAX_SOURCE_CHARS: usize = 10_000;

/// Fetches the textual content of the page under test. One GET, no retries,
/// default redirect and TLS handling, no custom headers.
pub struct SourceFetcher {
    client: Client,
    timeout: Duration,
}

impl SourceFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<String, GenerateError> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GenerateError::SourceFetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerateError::SourceFetch(format!(
                "{url} returned HTTP {status}"
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::SourceFetch(e.to_string()))?;

        Ok(truncate_chars(text, MAX_SOURCE_CHARS))
    }
}

/// Keep the first `max_chars` characters, never splitting a code point.
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}
