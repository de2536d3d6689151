use axum::{extract::State, Json};
use std::sync::Arc;

use crate::bandwidth;
use crate::catalog;
use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Audit the bandwidth of a finished port map against an optional goal
pub async fn audit_bandwidth(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BandwidthRequest>,
) -> Result<Json<BandwidthSummary>, ApiError> {
    let topology =
        catalog::topology(&req.topology_id).map_err(|_| ApiError::not_found("topology"))?;

    if let Some(goal) = &req.goal {
        if !goal.value.is_finite() || goal.value < 0.0 {
            return Err(ApiError::bad_request("goal must be a non-negative number"));
        }
    }
    if let Some(port) = req.port_map.iter().map(|a| a.port).find(|p| !topology.contains(*p)) {
        return Err(ApiError::bad_request(format!(
            "port {} is not on {}",
            port, topology.id
        )));
    }

    let uplink_speed = req.uplink_speed_gbps.unwrap_or(state.config.uplink_speed_gbps);
    Ok(Json(bandwidth::audit(
        topology,
        &req.port_map,
        req.goal,
        uplink_speed,
    )))
}
