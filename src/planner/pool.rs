use crate::models::{PortAssignment, PortLabel, PortMap, SwitchTopology};

use super::error::{PlanError, PlanResult};

/// PortPool tracks which physical ports of one switch are taken during an
/// allocation pass. It is scratch state: the planner only hands out the
/// finished map once every spec has been placed without error.
pub struct PortPool<'a> {
    topology: &'a SwitchTopology,
    map: PortMap,
}

impl<'a> PortPool<'a> {
    pub fn new(topology: &'a SwitchTopology) -> Self {
        Self {
            topology,
            map: PortMap::new(),
        }
    }

    pub fn topology(&self) -> &'a SwitchTopology {
        self.topology
    }

    pub fn is_free(&self, port: u16) -> bool {
        self.topology.contains(port) && !self.map.contains(port)
    }

    pub fn owner(&self, port: u16) -> Option<&PortLabel> {
        self.map.get(port).map(|a| &a.label)
    }

    pub fn free_count(&self) -> usize {
        self.topology.port_count as usize - self.map.len()
    }

    /// Free ports in ascending order
    pub fn free_ports(&self) -> impl Iterator<Item = u16> + '_ {
        (1..=self.topology.port_count).filter(move |p| !self.map.contains(*p))
    }

    /// True if `len` ports starting at `start` exist and are all free
    pub fn block_free(&self, start: u16, len: u16) -> bool {
        if len == 0 || start == 0 {
            return false;
        }
        let end = start as u32 + len as u32 - 1;
        if end > self.topology.port_count as u32 {
            return false;
        }
        (start..start + len).all(|p| !self.map.contains(p))
    }

    /// Start of the lowest free contiguous block, scanning up from port 1
    pub fn lowest_block(&self, len: u16) -> Option<u16> {
        if len == 0 || len > self.topology.port_count {
            return None;
        }
        (1..=self.topology.port_count - len + 1).find(|start| self.block_free(*start, len))
    }

    /// Start of the highest free contiguous block, scanning down from the
    /// last port
    pub fn highest_block(&self, len: u16) -> Option<u16> {
        if len == 0 || len > self.topology.port_count {
            return None;
        }
        (1..=self.topology.port_count - len + 1)
            .rev()
            .find(|start| self.block_free(*start, len))
    }

    /// Lowest and highest port currently carrying node endpoints
    pub fn node_span(&self) -> Option<(u16, u16)> {
        let mut node_ports = self.map.iter().filter(|a| a.label.is_node()).map(|a| a.port);
        let first = node_ports.next()?;
        let last = node_ports.last().unwrap_or(first);
        Some((first, last))
    }

    pub fn claim(&mut self, port: u16, label: PortLabel) -> PlanResult<()> {
        if !self.topology.contains(port) {
            return Err(PlanError::capacity(
                label.type_name(),
                format!(
                    "port {} is outside 1..{} on {}",
                    port, self.topology.port_count, self.topology.id
                ),
            ));
        }
        let second = label.type_name().to_string();
        self.map
            .insert(PortAssignment::new(port, label))
            .map_err(|existing| PlanError::OverlapConflict {
                port,
                first: existing.label.type_name().to_string(),
                second,
            })
    }

    /// Claim ports pairwise with labels. Both lists must be the same length.
    pub fn claim_all(&mut self, type_name: &str, ports: &[u16], labels: Vec<PortLabel>) -> PlanResult<()> {
        if ports.len() != labels.len() {
            return Err(PlanError::capacity(
                type_name,
                format!(
                    "ran out of candidate ports: {} collected for {} labels",
                    ports.len(),
                    labels.len()
                ),
            ));
        }
        for (port, label) in ports.iter().zip(labels) {
            self.claim(*port, label)?;
        }
        Ok(())
    }

    pub fn into_map(self) -> PortMap {
        self.map
    }
}
