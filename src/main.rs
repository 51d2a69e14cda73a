//! The ward-server binary.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward::{
    AppState, Config,
    api::routes,
    cli::Cli,
    db::DatabaseProvider,
    llm::{GenerationGate, LLMClientFactory, Provider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = Some(database);
    }

    let db_provider = match &config.database.path {
        Some(path) if path != ":memory:" => DatabaseProvider::SQLite { path: path.clone() },
        _ => DatabaseProvider::from_env(),
    };
    let store = db_provider
        .create_client()
        .await
        .context("failed to open database")?;

    let provider = build_provider(&config)?;
    tracing::info!(provider = provider.name(), "creating model client");
    let llm = LLMClientFactory::new(provider)
        .create_default()
        .await
        .context("failed to create model client")?;

    let gate = GenerationGate::new(
        config.llm.max_concurrent,
        Duration::from_secs(config.llm.acquire_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        store: Arc::from(store),
        llm: Arc::from(llm),
        gate: Arc::new(gate),
    };

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "ward server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn build_provider(config: &Config) -> anyhow::Result<Provider> {
    match config.llm.provider.as_str() {
        #[cfg(feature = "ollama")]
        "ollama" => Ok(Provider::Ollama {
            base_url: config.llm.ollama_url.clone(),
            model: config.llm.ollama_model.clone(),
        }),

        #[cfg(feature = "openai")]
        "openai" => Ok(Provider::OpenAI {
            api_key: config
                .llm
                .openai_api_key
                .clone()
                .context("OPENAI_API_KEY is required when LLM_PROVIDER=openai")?,
            api_base: config.llm.openai_api_base.clone(),
            model: config.llm.openai_model.clone(),
            params: ward::llm::GenerationParams {
                max_tokens: config.llm.max_tokens,
                temperature: config.llm.temperature,
            },
        }),

        other => anyhow::bail!("unknown or disabled LLM provider: {other}"),
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
