//! TalentScout server binary.
//!
//! Loads configuration from the environment, wires the adapters into the
//! interview handlers and serves the HTTP API.

use std::sync::Arc;

use secrecy::Secret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use talent_scout::adapters::http::{api_router, InterviewHandlers};
use talent_scout::adapters::{
    GoogleTranslator, InMemorySessionStore, LlmScreeningCapabilities, OpenAIConfig,
    OpenAIProvider, TracingReportSink,
};
use talent_scout::application::{
    ChangeLanguageHandler, FlowController, GetTranscriptHandler, StartInterviewHandler,
    SubmitUtteranceHandler,
};
use talent_scout::config::{AppConfig, ConfigError};
use talent_scout::ports::{IdentityTranslator, SessionStore, Translator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    let api_key = config.ai.api_key.clone().unwrap_or_default();
    let provider = OpenAIProvider::new(
        OpenAIConfig::from_secret(Secret::new(api_key))
            .with_base_url(&config.ai.base_url)
            .with_model(&config.ai.model)
            .with_temperature(config.ai.temperature)
            .with_timeout(config.ai.timeout()),
    )?;
    let capabilities = Arc::new(LlmScreeningCapabilities::new(Arc::new(provider)));

    let translator: Arc<dyn Translator> = if config.interview.translation_enabled {
        Arc::new(GoogleTranslator::new(
            &config.interview.translate_base_url,
            config.interview.capability_timeout(),
        )?)
    } else {
        Arc::new(IdentityTranslator)
    };

    let flow = Arc::new(
        FlowController::from_capabilities(capabilities, config.interview.flow_config())
            .with_translator(translator),
    );
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::with_archive_capacity(
        config.interview.archive_capacity,
    ));

    let handlers = InterviewHandlers::new(
        Arc::new(StartInterviewHandler::new(store.clone())),
        Arc::new(SubmitUtteranceHandler::new(
            store.clone(),
            flow,
            Arc::new(TracingReportSink),
        )),
        Arc::new(ChangeLanguageHandler::new(store.clone())),
        Arc::new(GetTranscriptHandler::new(store)),
    );

    let app = api_router(
        handlers,
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        model = %config.ai.model,
        translation = config.interview.translation_enabled,
        "talent-scout listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("talent-scout stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
