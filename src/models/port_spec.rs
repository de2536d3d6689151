use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Uplink type whose ports are shared out by node-origin category
pub const NORTHBOUND: &str = "NB";

/// Storage node type that alternates sides in column routing
pub const DATA_NODE: &str = "DN";

/// Switch half used by the column router
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// NodeSpec holds the port request for one node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub count: u32,
    #[serde(default)]
    pub split: bool,
    #[serde(default = "default_factor")]
    pub factor: u32,
    #[serde(default)]
    pub reserved: u32,
    #[serde(default)]
    pub manual_ports: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_starting_index")]
    pub starting_index: u32,
    #[serde(default)]
    pub side: Side,
}

impl NodeSpec {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            split: false,
            factor: default_factor(),
            reserved: 0,
            manual_ports: String::new(),
            locked: false,
            starting_index: default_starting_index(),
            side: Side::default(),
        }
    }

    /// Logical endpoints carried by each physical port
    pub fn breakout(&self) -> u32 {
        if self.split {
            self.factor.max(1)
        } else {
            1
        }
    }

    /// Physical ports serving logical endpoints, reserved ports excluded
    pub fn cabled_ports(&self) -> u32 {
        self.count.div_ceil(self.breakout())
    }

    /// Every physical port this type occupies
    pub fn required_ports(&self) -> u64 {
        self.cabled_ports() as u64 + self.reserved as u64
    }
}

/// One node-origin share of a northbound uplink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NorthboundOrigin {
    pub category: String,
    pub ports: u32,
}

/// UplinkSpec holds the port request for one uplink/trunk type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UplinkSpec {
    pub groups: u32,
    pub ports_per_group: u32,
    #[serde(default)]
    pub split: bool,
    #[serde(default = "default_factor")]
    pub factor: u32,
    #[serde(default)]
    pub reserved: u32,
    #[serde(default)]
    pub manual_ports: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<NorthboundOrigin>,
}

impl UplinkSpec {
    pub fn new(groups: u32, ports_per_group: u32) -> Self {
        Self {
            groups,
            ports_per_group,
            split: false,
            factor: default_factor(),
            reserved: 0,
            manual_ports: String::new(),
            locked: false,
            origins: Vec::new(),
        }
    }

    pub fn breakout(&self) -> u32 {
        if self.split {
            self.factor.max(1)
        } else {
            1
        }
    }

    /// Cabled physical ports in one group
    pub fn cabled_per_group(&self) -> u32 {
        self.ports_per_group.div_ceil(self.breakout())
    }

    /// Physical span of one group including its reserved tail
    pub fn group_span(&self) -> u64 {
        self.cabled_per_group() as u64 + self.reserved as u64
    }

    /// Saturates instead of wrapping for absurd group counts
    pub fn required_ports(&self) -> u64 {
        self.group_span().saturating_mul(self.groups as u64)
    }
}

/// SpecSet is the persisted shape of one switch's port requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSet {
    #[serde(default)]
    pub node_types: BTreeMap<String, NodeSpec>,
    #[serde(default)]
    pub uplink_types: BTreeMap<String, UplinkSpec>,
}

impl SpecSet {
    pub fn with_node(mut self, type_name: &str, spec: NodeSpec) -> Self {
        self.node_types.insert(type_name.to_string(), spec);
        self
    }

    pub fn with_uplink(mut self, type_name: &str, spec: UplinkSpec) -> Self {
        self.uplink_types.insert(type_name.to_string(), spec);
        self
    }

    /// Total physical ports requested across every type
    pub fn required_ports(&self) -> u64 {
        self.node_types
            .values()
            .map(NodeSpec::required_ports)
            .chain(self.uplink_types.values().map(UplinkSpec::required_ports))
            .fold(0, u64::saturating_add)
    }
}

fn default_factor() -> u32 {
    4
}

fn default_starting_index() -> u32 {
    1
}
