mod app_state;
mod config;
mod logger;
mod routes;

pub use self::app_state::AppState;
pub use self::config::Config;
use anyhow::Context;
use std::sync::Arc;
use tracing::error;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::load_path("config.toml").context("failed to load config")?;
    crate::logger::init(&config).context("failed to init logger")?;

    let tokio_rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    tokio_rt.block_on(async_main(config))
}

async fn async_main(config: Config) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState::new(&config)?);
    info!("forwarding to \"{}\"", app_state.client.base_url());

    let app = self::routes::routes(&config, app_state)?;
    let server_listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind to address \"{}\"", config.bind_address))?;

    info!("listening on \"{}\"", config.bind_address);

    axum::serve(server_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Wait for ctrl+c.
///
/// If the handler cannot be registered, this logs the error and never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c()
        .await
        .context("failed to register ctrl+c handler")
    {
        Ok(()) => {
            info!("shutting down");
        }
        Err(error) => {
            error!("{error:?}");
            std::future::pending::<()>().await;
        }
    }
}
