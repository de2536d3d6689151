use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::port_spec::NORTHBOUND;

/// PortLabel says what a physical port carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PortLabel {
    /// Logical node endpoints `first..=last` of one node type
    Node { type_name: String, first: u32, last: u32 },
    Reserved { type_name: String },
    /// One port of an uplink group. `group` is omitted when the type has a
    /// single group; `factor` is set for breakout uplinks.
    UplinkGroup {
        type_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<u32>,
        index: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        factor: Option<u32>,
    },
    /// Northbound port owned by a node-origin category
    Northbound {
        origin: String,
        index: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        factor: Option<u32>,
    },
}

impl PortLabel {
    /// Spec type that owns the port
    pub fn type_name(&self) -> &str {
        match self {
            PortLabel::Node { type_name, .. }
            | PortLabel::Reserved { type_name }
            | PortLabel::UplinkGroup { type_name, .. } => type_name,
            PortLabel::Northbound { .. } => NORTHBOUND,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, PortLabel::Reserved { .. })
    }

    pub fn is_node(&self) -> bool {
        matches!(self, PortLabel::Node { .. })
    }
}

impl fmt::Display for PortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortLabel::Node { type_name, first, last } if first == last => {
                write!(f, "{}-{}", type_name, first)
            }
            PortLabel::Node { type_name, first, last } => {
                write!(f, "{}-{}/{}", type_name, first, last)
            }
            PortLabel::Reserved { type_name } => write!(f, "RSVD-{}", type_name),
            PortLabel::UplinkGroup { type_name, group, index, factor } => {
                write!(f, "{}", type_name)?;
                if let Some(group) = group {
                    write!(f, "{}", group)?;
                }
                write!(f, "-{}", index)?;
                if let Some(factor) = factor {
                    write!(f, "/{}", factor)?;
                }
                Ok(())
            }
            PortLabel::Northbound { origin, index, factor } => {
                write!(f, "{}-{}-{}", NORTHBOUND, origin, index)?;
                if let Some(factor) = factor {
                    write!(f, "/{}", factor)?;
                }
                Ok(())
            }
        }
    }
}

/// PortAssignment binds one physical port to its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortAssignment {
    pub port: u16,
    pub label: PortLabel,
}

impl PortAssignment {
    pub fn new(port: u16, label: PortLabel) -> Self {
        Self { port, label }
    }
}

/// RenderedPort is the export form of an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPort {
    pub port: u16,
    pub label: String,
}

/// PortMap is the ordered result of one allocation pass.
/// Ports are unique and kept in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PortAssignment>", into = "Vec<PortAssignment>")]
pub struct PortMap {
    assignments: Vec<PortAssignment>,
}

impl PortMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an assignment, handing back the existing one if the port is
    /// already taken
    pub fn insert(&mut self, assignment: PortAssignment) -> Result<(), &PortAssignment> {
        match self
            .assignments
            .binary_search_by_key(&assignment.port, |a| a.port)
        {
            Ok(idx) => Err(&self.assignments[idx]),
            Err(idx) => {
                self.assignments.insert(idx, assignment);
                Ok(())
            }
        }
    }

    pub fn get(&self, port: u16) -> Option<&PortAssignment> {
        self.assignments
            .binary_search_by_key(&port, |a| a.port)
            .ok()
            .map(|idx| &self.assignments[idx])
    }

    pub fn contains(&self, port: u16) -> bool {
        self.get(port).is_some()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortAssignment> {
        self.assignments.iter()
    }

    pub fn ports(&self) -> BTreeSet<u16> {
        self.assignments.iter().map(|a| a.port).collect()
    }

    /// Assignments owned by one spec type, reserved ports included
    pub fn for_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a PortAssignment> {
        self.assignments
            .iter()
            .filter(move |a| a.label.type_name() == type_name)
    }

    pub fn render(&self) -> Vec<RenderedPort> {
        self.assignments
            .iter()
            .map(|a| RenderedPort {
                port: a.port,
                label: a.label.to_string(),
            })
            .collect()
    }
}

impl FromIterator<PortAssignment> for PortMap {
    /// Later duplicates of a port are dropped
    fn from_iter<I: IntoIterator<Item = PortAssignment>>(iter: I) -> Self {
        let mut map = PortMap::new();
        for assignment in iter {
            let _ = map.insert(assignment);
        }
        map
    }
}

impl TryFrom<Vec<PortAssignment>> for PortMap {
    type Error = String;

    /// Wire maps may arrive in any order but must not repeat a port
    fn try_from(assignments: Vec<PortAssignment>) -> Result<Self, Self::Error> {
        let mut map = PortMap::new();
        for assignment in assignments {
            let port = assignment.port;
            if map.insert(assignment).is_err() {
                return Err(format!("port {} appears more than once", port));
            }
        }
        Ok(map)
    }
}

impl From<PortMap> for Vec<PortAssignment> {
    fn from(map: PortMap) -> Self {
        map.assignments
    }
}
