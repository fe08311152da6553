mod configuration;
mod error;
mod routes;
mod state;

use configuration::Settings;
use dotenv::dotenv;
use state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    // Missing chat or RBAC credentials are startup-fatal
    let settings = Settings::new()?;
    let addr = settings.server.socket_addr();

    let state = AppState {
        claude: settings.claude,
        rbac: settings.rbac,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
