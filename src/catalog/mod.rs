use crate::models::SwitchTopology;
use crate::planner::PlanError;

const fn switch(
    id: &'static str,
    vendor: &'static str,
    display_name: &'static str,
    port_count: u16,
    native_speed_gbps: u32,
    balanced: bool,
) -> SwitchTopology {
    SwitchTopology {
        id,
        vendor,
        display_name,
        port_count,
        columns: 16,
        ports_per_column: port_count / 16,
        native_speed_gbps,
        balanced_node: balanced,
        balanced_uplink: balanced,
        column_router_eligible: true,
    }
}

static CATALOG: [SwitchTopology; 9] = [
    // Cisco Nexus
    switch("cisco-9332d", "cisco", "Cisco Nexus 9332D-GX2B", 32, 400, false),
    switch("cisco-9364d", "cisco", "Cisco Nexus 9364D-GX2A", 64, 400, false),
    // NVIDIA Spectrum
    switch("nvidia-sn3700", "nvidia", "NVIDIA SN3700", 32, 200, false),
    switch("nvidia-sn4600hr", "nvidia", "NVIDIA SN4600HR", 64, 200, false),
    switch("nvidia-sn5400", "nvidia", "NVIDIA SN5400", 64, 400, false),
    switch("nvidia-sn5600", "nvidia", "NVIDIA SN5600", 64, 800, false),
    // Arista 7060 parts spread load over 8-port ASIC slices
    switch("arista-7050dx4-32s", "arista", "Arista 7050DX4-32S", 32, 400, false),
    switch("arista-7060dx5-64s", "arista", "Arista 7060DX5-64S", 64, 400, true),
    switch("arista-7060x6-64pe", "arista", "Arista 7060X6-64PE", 64, 800, true),
];

/// Every known switch model
pub fn catalog() -> &'static [SwitchTopology] {
    &CATALOG
}

/// Look up one switch model by id (case-insensitive)
pub fn topology(model_id: &str) -> Result<&'static SwitchTopology, PlanError> {
    CATALOG
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(model_id.trim()))
        .ok_or_else(|| PlanError::UnknownTopology(model_id.to_string()))
}
