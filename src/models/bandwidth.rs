use serde::{Deserialize, Serialize};

use super::port_assignments::PortMap;

/// Bytes-per-second unit of a bandwidth goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalUnit {
    #[serde(rename = "GB/s")]
    GigabytesPerSec,
    #[serde(rename = "GiB/s")]
    GibibytesPerSec,
}

/// BandwidthGoal is the user-declared throughput target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthGoal {
    pub value: f64,
    pub unit: GoalUnit,
}

/// Bandwidth category a spec type reports under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkCategory {
    Node,
    InterSwitch,
    External,
}

/// CategoryBandwidth is the audit line for one type or category total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBandwidth {
    pub name: String,
    pub category: LinkCategory,
    pub ports: u32,
    pub port_speed_gbps: u32,
    pub per_switch_gbps: f64,
    pub aggregate_gbps: f64,
    pub ha_gbps: f64,
    pub meets_per_switch: bool,
    pub meets_aggregate: bool,
    pub meets_ha: bool,
}

/// BandwidthSummary is the audit of a finished port map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandwidthSummary {
    pub topology_id: String,
    pub goal_gbps: Option<f64>,
    pub types: Vec<CategoryBandwidth>,
    pub categories: Vec<CategoryBandwidth>,
}

/// BandwidthRequest asks for an audit of a port map
#[derive(Debug, Clone, Deserialize)]
pub struct BandwidthRequest {
    pub topology_id: String,
    pub port_map: PortMap,
    #[serde(default)]
    pub goal: Option<BandwidthGoal>,
    #[serde(default)]
    pub uplink_speed_gbps: Option<u32>,
}

/// Gigabits in one gigabyte
pub const GBIT_PER_GB: f64 = 8.0;
/// Gigabits in one gibibyte (2^30 bytes * 8 / 10^9)
pub const GBIT_PER_GIB: f64 = 8.589934592;

impl GoalUnit {
    pub fn to_gbps(self, value: f64) -> f64 {
        match self {
            GoalUnit::GigabytesPerSec => value * GBIT_PER_GB,
            GoalUnit::GibibytesPerSec => value * GBIT_PER_GIB,
        }
    }
}

impl BandwidthGoal {
    /// Goal expressed in Gb/s
    pub fn gbps(&self) -> f64 {
        self.unit.to_gbps(self.value)
    }
}
