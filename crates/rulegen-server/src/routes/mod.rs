// Export route modules
pub mod generate;
pub mod health;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(generate::routes(state))
        .merge(health::routes())
}
