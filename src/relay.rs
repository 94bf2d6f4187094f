use crate::config::Config;
use crate::error::RelayError;
use crate::ollama::OllamaClient;

/// Reply used when a successful generate response has no `response` field.
pub const FALLBACK_REPLY: &str = "No response from model.";

/// Stateless per-message relay: one prompt in, exactly one reply string out.
///
/// No history is kept between messages and no failure is retried; each
/// inbound message is an independent unit of work.
pub struct Relay {
    client: Option<OllamaClient>,
    model: String,
}

impl Relay {
    pub fn new(config: &Config) -> Self {
        Self {
            client: config
                .ollama_host
                .as_deref()
                .map(|host| OllamaClient::new(host, config.request_timeout)),
            model: config.ollama_model.clone(),
        }
    }

    /// Whether an Ollama host was configured at startup.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Maps every outcome (success, missing field, any failure) to the
    /// single reply text sent back to the chat. Failures are also logged.
    pub async fn reply_to(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{e}");
                e.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, RelayError> {
        let client = self.client.as_ref().ok_or(RelayError::HostNotConfigured)?;
        let res = client.generate(&self.model, prompt).await?;
        Ok(res.response.unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
