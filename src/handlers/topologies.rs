use axum::{extract::Path, Json};

use crate::catalog;
use crate::models::SwitchTopology;

use super::ApiError;

/// List every switch model in the catalog
pub async fn list_topologies() -> Json<Vec<SwitchTopology>> {
    Json(catalog::catalog().to_vec())
}

/// Get a single switch model by id
pub async fn get_topology(Path(id): Path<String>) -> Result<Json<SwitchTopology>, ApiError> {
    let topology = catalog::topology(&id).map_err(|_| ApiError::not_found("topology"))?;
    Ok(Json(topology.clone()))
}
