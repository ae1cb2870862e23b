use std::path::PathBuf;

mod app;
mod auth;
mod catalog;
mod config;
mod error;
mod export;
mod extract;
mod games;
mod state;
mod users;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "playhub=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init()?;
    tracing::info!(mode = ?app_state.config.mode, "catalog ready");

    // `playhub export <dir>` writes the static-site JSON and exits
    let mut args = std::env::args().skip(1);
    if let Some(cmd) = args.next() {
        anyhow::ensure!(cmd == "export", "unknown command {cmd:?}, expected `export <dir>`");
        let dir = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| app_state.config.data_dir());
        export::export_static(&app_state.store, &dir).await?;
        return Ok(());
    }

    app::serve(app::build_app(app_state)).await
}
