//! Authenticity scoring gateway — entry point.
//!
//! Reads configuration from environment variables and starts the
//! axum-based HTTP service.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | `8787` | TCP port to listen on. |
//! | `CORS_ORIGIN` | `*` | Allowed CORS origin. |
//! | `PROVIDER` | `demo` | `openai`, `gemini`, or `demo` (offline only). |
//! | `OPENAI_MODEL` | `gpt-4o-mini` | OpenAI model identifier. |
//! | `GEMINI_MODEL` | `gemini-1.5-flash` | Gemini model identifier. |
//! | `OPENAI_API_KEY` | *(none)* | OpenAI credential; absence means offline fallback. |
//! | `GEMINI_API_KEY` | *(none)* | Gemini credential; absence means offline fallback. |
//! | `RATE_LIMIT_MAX` | `60` | Requests allowed per window, process-wide. |
//! | `RATE_LIMIT_WINDOW_SECS` | `60` | Rate-limit window length. |
//! | `PROVIDER_TIMEOUT_SECS` | `10` | Bound on outbound provider calls. |

use artscore_gateway::config::GatewayConfig;
use artscore_gateway::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("artscore_gateway=info".parse().unwrap())
                .add_directive("artscore_core=info".parse().unwrap()),
        )
        .init();

    let config = GatewayConfig::from_env();

    info!(
        port = config.port,
        provider = config.provider.as_str(),
        openai_configured = config.openai_configured(),
        gemini_configured = config.gemini_configured(),
        "gateway configuration loaded"
    );

    if let Err(e) = server::serve(config).await {
        eprintln!("gateway error: {e}");
        std::process::exit(1);
    }
}
