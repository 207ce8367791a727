use std::net::SocketAddr;
use std::sync::Arc;

use pancheck_core::tesseract::TesseractEngine;
use pancheck_kyc::{SandboxApi, SandboxConfig};
use pancheck_store::models::user::CreateUser;
use pancheck_store::repositories::{InMemoryUserRepo, UserRepo};
use pancheck_store::seed::DEMO_ACCOUNTS;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pancheck_api::auth::password::hash_password;
use pancheck_api::config::ServerConfig;
use pancheck_api::router::build_app_router;
use pancheck_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pancheck_api=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let sandbox = SandboxConfig::from_env();
    tracing::info!(base_url = %sandbox.base_url, "Loaded KYC provider configuration");

    // --- User store ---
    let users = Arc::new(InMemoryUserRepo::new());
    seed_demo_accounts(users.as_ref()).await;
    tracing::info!(count = users.count().await, "Seeded demo accounts");

    // --- OCR ---
    let ocr = TesseractEngine::new(&config.ocr.tesseract_bin, &config.ocr.language);
    tracing::info!(
        binary = %config.ocr.tesseract_bin,
        language = %config.ocr.language,
        "Using Tesseract OCR backend"
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        users,
        ocr: Arc::new(ocr),
        verifier: Arc::new(SandboxApi::new(sandbox)),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Load the demo accounts into a fresh store.
///
/// Panics if hashing fails; the server is useless without its accounts.
async fn seed_demo_accounts(users: &dyn UserRepo) {
    for account in DEMO_ACCOUNTS {
        let password_hash =
            hash_password(account.password).expect("Failed to hash demo account password");
        users
            .create(CreateUser {
                name: account.name.to_string(),
                email: account.email.to_string(),
                password_hash,
            })
            .await
            .expect("Demo accounts must have unique emails");
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
