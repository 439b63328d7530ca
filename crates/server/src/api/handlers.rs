use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use shared::Error;
use shared::data::{
    ActivityView, CreateMachineRequest, CreateMachineResponse, CreateNetworkRequest,
    CreateSshKeyRequest, ImageView, ListActivitiesResponse, ListImagesResponse,
    ListMachinesResponse, ListNetworksResponse, ListSshKeysResponse, MachineDetailsResponse,
    NetworkView, SshKeyView, TriggerMachineRequest, TriggerMachineResponse,
};

use crate::daemon::state::AppState;
use crate::services::{machine_create, machine_delete, machine_list, machine_trigger, network};

use super::errors::ApiError;

pub async fn health_check() -> &'static str {
    "ok"
}

// ============================================================================
// Machines
// ============================================================================

pub async fn create_machine_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateMachineRequest>,
) -> Result<Json<CreateMachineResponse>, ApiError> {
    Ok(Json(machine_create::create_machine(&state, request).await?))
}

pub async fn list_machines_handler(
    State(state): State<AppState>,
) -> Result<Json<ListMachinesResponse>, ApiError> {
    Ok(Json(machine_list::list_machines(&state).await?))
}

pub async fn get_machine_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MachineDetailsResponse>, ApiError> {
    Ok(Json(machine_list::get_machine_details(&state, &id).await?))
}

pub async fn delete_machine_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    machine_delete::delete_machine(&state, &id).await?;
    Ok(Json(serde_json::json!({})))
}

pub async fn trigger_machine_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TriggerMachineRequest>,
) -> Result<Json<TriggerMachineResponse>, ApiError> {
    Ok(Json(
        machine_trigger::trigger_machine(&state, &id, request.event).await?,
    ))
}

// ============================================================================
// SSH keys
// ============================================================================

pub async fn create_ssh_key_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateSshKeyRequest>,
) -> Result<Json<SshKeyView>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(Error::InvalidArgument("ssh key name is required".into()).into());
    }
    if request.pubkey.trim().is_empty() {
        return Err(Error::InvalidArgument("ssh key material is required".into()).into());
    }

    let key_id = Uuid::new_v4().to_string();
    let key = db::create_ssh_key(&state.db, &key_id, &request.name, &request.pubkey)
        .await
        .map_err(Error::Persistence)?;

    tracing::info!(key = %key.name, id = %key.key_id, "Created ssh key");

    Ok(Json(SshKeyView::from(&key)))
}

pub async fn list_ssh_keys_handler(
    State(state): State<AppState>,
) -> Result<Json<ListSshKeysResponse>, ApiError> {
    let keys = db::list_ssh_keys(&state.db)
        .await
        .map_err(Error::Persistence)?;

    Ok(Json(ListSshKeysResponse {
        ssh_keys: keys.iter().map(SshKeyView::from).collect(),
    }))
}

pub async fn delete_ssh_key_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Deletion is blocked while any machine still references the key.
    let machines = db::list_machines(&state.db)
        .await
        .map_err(Error::Persistence)?;
    if let Some(holder) = machines
        .iter()
        .find(|machine| machine.ssh_key_ids.contains(&id))
    {
        return Err(Error::InvalidArgument(format!(
            "ssh key is still referenced by machine {}",
            holder.name
        ))
        .into());
    }

    let deleted = db::delete_ssh_key(&state.db, &id)
        .await
        .map_err(Error::Persistence)?;
    if !deleted {
        return Err(Error::NotFound(format!("ssh key {id}")).into());
    }

    tracing::info!(id = %id, "Deleted ssh key");

    Ok(Json(serde_json::json!({})))
}

// ============================================================================
// Images
// ============================================================================

pub async fn list_images_handler(
    State(state): State<AppState>,
) -> Result<Json<ListImagesResponse>, ApiError> {
    let images = db::list_images(&state.db)
        .await
        .map_err(Error::Persistence)?;

    Ok(Json(ListImagesResponse {
        images: images.iter().map(ImageView::from).collect(),
    }))
}

// ============================================================================
// Networks
// ============================================================================

pub async fn create_network_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateNetworkRequest>,
) -> Result<Json<NetworkView>, ApiError> {
    Ok(Json(network::create_network(&state, request).await?))
}

pub async fn list_networks_handler(
    State(state): State<AppState>,
) -> Result<Json<ListNetworksResponse>, ApiError> {
    let networks = db::list_networks(&state.db)
        .await
        .map_err(Error::Persistence)?;

    Ok(Json(ListNetworksResponse {
        networks: networks.iter().map(NetworkView::from).collect(),
    }))
}

// ============================================================================
// Activities
// ============================================================================

pub async fn list_activities_handler(
    State(state): State<AppState>,
) -> Result<Json<ListActivitiesResponse>, ApiError> {
    let activities = db::list_activities(&state.db)
        .await
        .map_err(Error::Persistence)?;

    Ok(Json(ListActivitiesResponse {
        activities: activities.iter().map(ActivityView::from).collect(),
    }))
}
