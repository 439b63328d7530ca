use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::daemon::state::AppState;

use super::handlers::{
    create_machine_handler, create_network_handler, create_ssh_key_handler,
    delete_machine_handler, delete_ssh_key_handler, get_machine_handler, health_check,
    list_activities_handler, list_images_handler, list_machines_handler, list_networks_handler,
    list_ssh_keys_handler, trigger_machine_handler,
};

/// Build the Axum router with all API routes
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/v1/machines",
            get(list_machines_handler).post(create_machine_handler),
        )
        .route(
            "/api/v1/machines/{id}",
            get(get_machine_handler).delete(delete_machine_handler),
        )
        .route("/api/v1/machines/{id}/trigger", post(trigger_machine_handler))
        .route(
            "/api/v1/ssh-keys",
            get(list_ssh_keys_handler).post(create_ssh_key_handler),
        )
        .route("/api/v1/ssh-keys/{id}", delete(delete_ssh_key_handler))
        .route("/api/v1/images", get(list_images_handler))
        .route(
            "/api/v1/networks",
            get(list_networks_handler).post(create_network_handler),
        )
        .route("/api/v1/activities", get(list_activities_handler))
        .layer(TraceLayer::new_for_http())
}
