//! Environment-driven gateway configuration.
//!
//! Read once at startup and immutable for the process lifetime — nothing
//! re-reads the environment after boot.

use std::time::Duration;
use tracing::warn;

/// Which scoring backend the gateway is configured to prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    /// Offline-only mode: every request is answered by the deterministic
    /// scorer.
    Demo,
}

impl ProviderKind {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "gemini" => Self::Gemini,
            "demo" => Self::Demo,
            other => {
                warn!(provider = other, "unrecognized PROVIDER value, running in demo mode");
                Self::Demo
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Demo => "demo",
        }
    }
}

/// Process-wide gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Allowed CORS origin; `*` permits any origin.
    pub cors_origin: String,
    pub provider: ProviderKind,
    pub openai_model: String,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    /// Requests allowed per rate-limit window, process-wide.
    pub rate_limit_max: u64,
    pub rate_limit_window: Duration,
    /// Bound on each outbound provider call (and image fetch).
    pub provider_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            cors_origin: "*".to_string(),
            provider: ProviderKind::Demo,
            openai_model: "gpt-4o-mini".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            openai_api_key: None,
            gemini_api_key: None,
            rate_limit_max: 60,
            rate_limit_window: Duration::from_secs(60),
            provider_timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything absent or unparseable.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PORT` | `8787` |
    /// | `CORS_ORIGIN` | `*` |
    /// | `PROVIDER` | `demo` |
    /// | `OPENAI_MODEL` | `gpt-4o-mini` |
    /// | `GEMINI_MODEL` | `gemini-1.5-flash` |
    /// | `OPENAI_API_KEY` | *(none)* |
    /// | `GEMINI_API_KEY` | *(none)* |
    /// | `RATE_LIMIT_MAX` | `60` |
    /// | `RATE_LIMIT_WINDOW_SECS` | `60` |
    /// | `PROVIDER_TIMEOUT_SECS` | `10` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: parsed_var("PORT").unwrap_or(defaults.port),
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            provider: std::env::var("PROVIDER")
                .map(|v| ProviderKind::parse(&v))
                .unwrap_or(defaults.provider),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            rate_limit_max: parsed_var("RATE_LIMIT_MAX").unwrap_or(defaults.rate_limit_max),
            rate_limit_window: parsed_var("RATE_LIMIT_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.rate_limit_window),
            provider_timeout: parsed_var("PROVIDER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_timeout),
        }
    }

    /// Credential presence for the OpenAI backend. An empty value counts
    /// as absent.
    pub fn openai_configured(&self) -> bool {
        self.openai_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Credential presence for the Gemini backend.
    pub fn gemini_configured(&self) -> bool {
        self.gemini_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!(ProviderKind::parse("OpenAI"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::parse("GEMINI"), ProviderKind::Gemini);
        assert_eq!(ProviderKind::parse("demo"), ProviderKind::Demo);
    }

    #[test]
    fn unrecognized_provider_runs_demo() {
        assert_eq!(ProviderKind::parse("anthropic"), ProviderKind::Demo);
        assert_eq!(ProviderKind::parse(""), ProviderKind::Demo);
    }

    #[test]
    fn empty_credential_counts_as_absent() {
        let config = GatewayConfig {
            openai_api_key: Some(String::new()),
            gemini_api_key: Some("k".to_string()),
            ..Default::default()
        };
        assert!(!config.openai_configured());
        assert!(config.gemini_configured());
    }

    #[test]
    fn defaults_match_the_documented_table() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 8787);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.provider, ProviderKind::Demo);
        assert_eq!(config.rate_limit_max, 60);
        assert_eq!(config.rate_limit_window, Duration::from_secs(60));
    }
}
