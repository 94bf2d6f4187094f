use std::time::Duration;

pub const DEFAULT_MODEL: &str = "llama3";

const PLACEHOLDER_TOKEN: &str = "YOUR_TELEGRAM_BOT_TOKEN";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings resolved once at startup; read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Base address of the Ollama server. `None` means unconfigured; the
    /// relay reports that per message instead of refusing to start.
    pub ollama_host: Option<String>,
    pub ollama_model: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lookup seam so tests never have to mutate the process environment.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let telegram_bot_token = var("TELEGRAM_BOT_TOKEN").unwrap_or_else(|| {
            tracing::warn!("TELEGRAM_BOT_TOKEN is not set; Telegram will reject the connection");
            PLACEHOLDER_TOKEN.to_string()
        });

        let ollama_host = var("OLLAMA_HOST").filter(|host| !host.is_empty());
        let ollama_model = var("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout = match var("OLLAMA_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        "Invalid OLLAMA_TIMEOUT_SECS {raw:?}; using {DEFAULT_TIMEOUT_SECS}s"
                    );
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Self {
            telegram_bot_token,
            ollama_host,
            ollama_model,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn all_variables_set() {
        let config = config_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:ABC"),
            ("OLLAMA_HOST", "http://10.0.0.5:11434"),
            ("OLLAMA_MODEL", "mistral"),
            ("OLLAMA_TIMEOUT_SECS", "120"),
        ]);
        assert_eq!(config.telegram_bot_token, "123:ABC");
        assert_eq!(config.ollama_host.as_deref(), Some("http://10.0.0.5:11434"));
        assert_eq!(config.ollama_model, "mistral");
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn missing_token_uses_placeholder() {
        let config = config_from(&[("OLLAMA_HOST", "http://localhost:11434")]);
        assert_eq!(config.telegram_bot_token, PLACEHOLDER_TOKEN);
    }

    #[test]
    fn missing_host_stays_unset() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "tok")]);
        assert!(config.ollama_host.is_none());
    }

    #[test]
    fn empty_host_treated_as_unset() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "tok"), ("OLLAMA_HOST", "")]);
        assert!(config.ollama_host.is_none());
    }

    #[test]
    fn model_defaults_to_llama3() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "tok")]);
        assert_eq!(config.ollama_model, DEFAULT_MODEL);
    }

    #[test]
    fn timeout_defaults_to_60s() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "tok")]);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        for raw in ["abc", "0", "-5", ""] {
            let config = config_from(&[("TELEGRAM_BOT_TOKEN", "tok"), ("OLLAMA_TIMEOUT_SECS", raw)]);
            assert_eq!(config.request_timeout, Duration::from_secs(60), "raw = {raw:?}");
        }
    }
}
