use tracing::info;

use parley_api::config::Settings;
use parley_api::router::build_router;
use parley_api::state::AppState;
use parley_core::config::Config;
use parley_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::from_env()?;

    // Resolve at boot so the Supabase advisory, if any, reaches the
    // operator before the first connection attempt. The URL itself may
    // carry credentials, so only the scheme is logged.
    let database_url = settings.resolved_database_url();
    let scheme = database_url.split(':').next().unwrap_or("unknown");
    info!(scheme, "database configured");

    let router = build_router(AppState::new(settings));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("api service listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
