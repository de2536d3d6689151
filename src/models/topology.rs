use serde::Serialize;

/// Number of ports in one balancing slice
pub const SLICE_WIDTH: u16 = 8;

/// SwitchTopology describes one switch model in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchTopology {
    pub id: &'static str,
    pub vendor: &'static str,
    pub display_name: &'static str,
    pub port_count: u16,
    pub columns: u16,
    pub ports_per_column: u16,
    pub native_speed_gbps: u32,
    /// Node types are spread evenly over 8-port slices
    pub balanced_node: bool,
    /// Uplink types are spread evenly over 8-port slices
    pub balanced_uplink: bool,
    pub column_router_eligible: bool,
}

impl SwitchTopology {
    /// Zero-based column holding a physical port
    pub fn column_of(&self, port: u16) -> u16 {
        (port - 1) / self.ports_per_column
    }

    /// Ports grouped column by column, each column listed top to bottom
    pub fn column_major(&self) -> Vec<Vec<u16>> {
        (0..self.columns)
            .map(|col| {
                (1..=self.ports_per_column)
                    .map(|row| col * self.ports_per_column + row)
                    .filter(|port| *port <= self.port_count)
                    .collect()
            })
            .collect()
    }

    /// LEFT and RIGHT halves in consumption order.
    /// LEFT walks the first half of the columns upward; RIGHT walks the
    /// second half backwards, so it starts from the highest port.
    pub fn halves(&self) -> (Vec<u16>, Vec<u16>) {
        let columns = self.column_major();
        let mid = columns.len() / 2;
        let left: Vec<u16> = columns[..mid].iter().flatten().copied().collect();
        let mut right: Vec<u16> = columns[mid..].iter().flatten().copied().collect();
        right.reverse();
        (left, right)
    }

    pub fn slice_count(&self) -> usize {
        (self.port_count / SLICE_WIDTH) as usize
    }

    /// Ports of one slice in ascending order
    pub fn slice_ports(&self, slice: usize) -> Vec<u16> {
        let base = slice as u16 * SLICE_WIDTH;
        (base + 1..=base + SLICE_WIDTH)
            .filter(|port| *port <= self.port_count)
            .collect()
    }

    pub fn contains(&self, port: u16) -> bool {
        (1..=self.port_count).contains(&port)
    }
}
