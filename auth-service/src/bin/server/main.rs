use std::sync::Arc;

use auth_service::config::Config;
use auth_service::config::Env;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::outbound::JwtTokenIssuer;
use auth_service::outbound::PostgresStorage;
use auth_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    init_tracing(config.env);

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        env = ?config.env,
        "Service starting"
    );

    tracing::info!(
        grpc_port = config.grpc.port,
        grpc_timeout_secs = config.grpc.timeout_secs,
        token_ttl_secs = config.token_ttl_secs,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let storage = Arc::new(
        PostgresStorage::connect(&config.database.url, config.database.max_connections).await?,
    );
    tracing::info!(
        database = "postgresql",
        "Database connection pool created and migrations applied"
    );

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        Arc::clone(&storage),
        Arc::new(JwtTokenIssuer::new()),
        config.token_ttl(),
    ));

    let grpc_address = format!("0.0.0.0:{}", config.grpc.port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service, config.grpc.timeout());
    tracing::info!(
        address = %grpc_address,
        port = config.grpc.port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Service stopped");

    Ok(())
}

/// `local` logs human-readable text at debug, `dev` JSON at debug, `prod` JSON at info.
/// `RUST_LOG` overrides the level in every environment.
fn init_tracing(env: Env) {
    let default_level = match env {
        Env::Local | Env::Dev => "auth_service=debug",
        Env::Prod => "auth_service=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    let registry = tracing_subscriber::registry().with(filter);
    match env {
        Env::Local => registry.with(tracing_subscriber::fmt::layer()).init(),
        Env::Dev | Env::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping gRpc server");
}
