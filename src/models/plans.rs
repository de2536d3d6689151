use serde::{Deserialize, Serialize};

use super::port_assignments::{PortMap, RenderedPort};
use super::port_spec::SpecSet;

/// Allocation strategy family requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Sequential fill, or balanced slices where the switch model asks for it
    #[default]
    Standard,
    /// Left/right column routing with centered uplinks
    Advanced,
}

/// SliceCursor is the rotating start slice carried between balanced
/// allocations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceCursor(pub usize);

/// PlanRequest is one immutable snapshot of a switch's port requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    pub topology_id: String,
    #[serde(default)]
    pub mode: PlanMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbox_variant: Option<String>,
    #[serde(flatten)]
    pub specs: SpecSet,
    /// Previous map; only consulted for ports of locked types
    #[serde(default)]
    pub locked: PortMap,
    #[serde(default)]
    pub cursor: SliceCursor,
}

/// PlanOutcome is a complete, conflict-free allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub port_map: PortMap,
    pub cursor: SliceCursor,
}

/// PlanResponse is returned by the plan endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub topology_id: String,
    pub port_map: PortMap,
    pub labels: Vec<RenderedPort>,
    pub cursor: SliceCursor,
}

impl PlanResponse {
    pub fn new(topology_id: impl Into<String>, outcome: PlanOutcome) -> Self {
        Self {
            topology_id: topology_id.into(),
            labels: outcome.port_map.render(),
            port_map: outcome.port_map,
            cursor: outcome.cursor,
        }
    }
}

/// PlanErrorEntry is one error of a rejected plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanErrorEntry {
    pub kind: &'static str,
    pub message: String,
}

/// BatchPlanRequest carries independent plans for distinct racks
#[derive(Debug, Clone, Deserialize)]
pub struct BatchPlanRequest {
    pub plans: Vec<PlanRequest>,
}

/// BatchPlanResult is the per-rack outcome of a batch
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchPlanResult {
    Planned(PlanResponse),
    Rejected {
        topology_id: String,
        errors: Vec<PlanErrorEntry>,
    },
}
