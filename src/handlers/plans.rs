use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Fill in server-side defaults the request left out
fn with_defaults(state: &AppState, mut req: PlanRequest) -> PlanRequest {
    if req.dbox_variant.as_deref().map_or(true, |v| v.trim().is_empty()) {
        req.dbox_variant = Some(state.config.default_dbox_variant.clone());
    }
    req
}

/// Compute the port map for one switch
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    if req.topology_id.trim().is_empty() {
        return Err(ApiError::bad_request("topology_id is required"));
    }
    let req = with_defaults(&state, req);
    let topology_id = req.topology_id.clone();
    let requested = req.specs.required_ports();
    let outcome = state.plan_pool.run(req).await??;
    tracing::info!(
        "Planned {} ports on {} ({} requested)",
        outcome.port_map.len(),
        topology_id,
        requested
    );
    Ok(Json(PlanResponse::new(topology_id, outcome)))
}

/// Plan several independent racks concurrently
pub async fn create_plan_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchPlanRequest>,
) -> Result<Json<Vec<BatchPlanResult>>, ApiError> {
    if req.plans.is_empty() {
        return Err(ApiError::bad_request("plans is required"));
    }
    let plans = req
        .plans
        .into_iter()
        .map(|plan| with_defaults(&state, plan))
        .collect();
    Ok(Json(state.plan_pool.run_batch(plans).await?))
}
