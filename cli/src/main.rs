//! Server entrypoint for Digital Twin
//!
//! This is the main binary that resolves configuration once, constructs
//! every adapter once, and wires them together using dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twin_application::ConverseUseCase;
use tokio::net::TcpListener;
use twin_domain::{ServerConfig, ServiceConfig};
use twin_infrastructure::{
    ConfigLoader, build_prompt_source, build_provider, build_session_store,
};
use twin_presentation::{AppState, Cli, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        return Ok(());
    }

    let _log_guard = init_logging(&cli);

    // === Configuration (resolved once, fatal on error) ===
    let file_config = if cli.no_config {
        ConfigLoader::load_env_only()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let mut config = file_config
        .into_service_config()
        .context("Invalid configuration")?;
    if let Some(host) = cli.host.clone() {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!(
        provider = %config.provider.kind,
        model = %config.provider.model_id,
        storage = config.storage.label(),
        "Starting Digital Twin"
    );

    serve(config).await
}

async fn serve(config: ServiceConfig) -> Result<()> {
    // === Dependency Injection ===
    let store = build_session_store(&config.storage)
        .await
        .context("Failed to initialize session storage")?;
    let provider = build_provider(&config.provider)
        .await
        .context("Failed to initialize model provider")?;
    let prompt = build_prompt_source(&config.prompt).context("Failed to load system prompt")?;

    let converse = ConverseUseCase::new(store, provider, prompt);
    let app = build_router(AppState::new(converse), &config.server.cors_origins);

    let listener = bind_listener(&config.server).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read bound address")?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Bind the listen socket. The host may be a hostname or any IP literal.
async fn bind_listener(server: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", server.host, server.port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize logging based on verbosity level, with `RUST_LOG` taking
/// precedence. The returned guard must live until exit to flush file logs.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new(
            "warn,digital_twin=info,twin_application=info,twin_infrastructure=info,twin_presentation=info",
        ),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "digital-twin.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    guard
}
