use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::time::interval;

use auth_gateway::{
    api::{create_api_router, AppContext},
    config::Config,
    session::SessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting auth gateway");

    let config = Config::from_env()?;
    let sessions = SessionStore::new(chrono::Duration::seconds(config.session.ttl_secs));

    let sweep_sessions = sessions.clone();
    let sweep_interval_secs = config.session.sweep_interval_secs;

    // Lazy on-read expiration keeps verification correct on its own; this
    // sweep only bounds memory held by abandoned sessions.
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(sweep_interval_secs));

        loop {
            interval.tick().await;
            sweep_sessions.evict_expired().await;

            let session_count = sweep_sessions.session_count().await;
            if session_count > 0 {
                tracing::info!("Active sessions: {}", session_count);
            }
        }
    });

    let context = AppContext {
        sessions,
        config: config.clone(),
    };

    let app: Router = create_api_router(context);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Auth gateway running on http://{}", addr);
    tracing::info!("Session TTL: {}s", config.session.ttl_secs);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
