use crate::models::{NodeSpec, SliceCursor, UplinkSpec};

use super::error::{PlanError, PlanResult};
use super::labels::{node_labels, uplink_labels};
use super::pool::PortPool;

/// Fill direction: nodes walk slices and ports upward, uplinks downward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Slice reached `steps` slices away from `start`, wrapping around
    fn rotate(self, start: usize, steps: usize, slices: usize) -> usize {
        match self {
            Direction::Ascending => (start + steps) % slices,
            Direction::Descending => (start + slices - steps % slices) % slices,
        }
    }
}

/// Choose `needed` free ports spread evenly across the switch's 8-port
/// slices.
///
/// Every slice gets `needed / slices` ports; the remainder goes one each to
/// the slices reached by stepping from the cursor in the fill direction. A
/// slice with fewer free ports than its share fails the request; there is no
/// rebalancing onto other slices. Ports are taken one per slice per pass in
/// rotating order. The returned cursor is one past the last slice touched.
pub fn select_balanced(
    pool: &PortPool,
    type_name: &str,
    needed: usize,
    cursor: SliceCursor,
    direction: Direction,
) -> PlanResult<(Vec<u16>, SliceCursor)> {
    let topology = pool.topology();
    let slices = topology.slice_count();
    if needed == 0 {
        return Ok((Vec::new(), cursor));
    }
    if slices == 0 {
        return Err(PlanError::capacity(
            type_name,
            format!("{} has no 8-port slices to balance over", topology.id),
        ));
    }
    let start = cursor.0 % slices;

    let base = needed / slices;
    let remainder = needed % slices;
    let mut shares = vec![base; slices];
    for step in 0..remainder {
        shares[direction.rotate(start, step, slices)] += 1;
    }

    let free: Vec<Vec<u16>> = (0..slices)
        .map(|slice| {
            let mut ports: Vec<u16> = topology
                .slice_ports(slice)
                .into_iter()
                .filter(|p| pool.is_free(*p))
                .collect();
            if direction == Direction::Descending {
                ports.reverse();
            }
            ports
        })
        .collect();

    if let Some(slice) = (0..slices).find(|s| free[*s].len() < shares[*s]) {
        return Err(PlanError::SliceShortfall {
            type_name: type_name.to_string(),
            slice,
            free: free[slice].len(),
            share: shares[slice],
        });
    }

    let mut taken = vec![0usize; slices];
    let mut chosen = Vec::with_capacity(needed);
    let mut last_touched = start;
    'passes: while chosen.len() < needed {
        let mut progressed = false;
        for step in 0..slices {
            let slice = direction.rotate(start, step, slices);
            if taken[slice] >= shares[slice] {
                continue;
            }
            let Some(port) = free[slice].get(taken[slice]) else {
                continue;
            };
            chosen.push(*port);
            taken[slice] += 1;
            last_touched = slice;
            progressed = true;
            if chosen.len() == needed {
                break 'passes;
            }
        }
        if !progressed {
            return Err(PlanError::capacity(
                type_name,
                format!(
                    "balancing pass stalled with {} of {} ports placed",
                    chosen.len(),
                    needed
                ),
            ));
        }
    }

    let next = SliceCursor(direction.rotate(last_touched, 1, slices));
    Ok((chosen, next))
}

/// Place a node type across slices, labeling the chosen ports in ascending
/// order
pub fn place_node(
    pool: &mut PortPool,
    type_name: &str,
    spec: &NodeSpec,
    cursor: SliceCursor,
) -> PlanResult<SliceCursor> {
    let labels = node_labels(type_name, spec);
    let (mut ports, next) = select_balanced(pool, type_name, labels.len(), cursor, Direction::Ascending)?;
    ports.sort_unstable();
    tracing::debug!("{}: balanced over slices, ports {:?}", type_name, ports);
    pool.claim_all(type_name, &ports, labels)?;
    Ok(next)
}

/// Place an uplink type across slices. Chosen ports are sorted ascending and
/// handed out group by group.
pub fn place_uplink(
    pool: &mut PortPool,
    type_name: &str,
    spec: &UplinkSpec,
    cursor: SliceCursor,
) -> PlanResult<SliceCursor> {
    let labels = uplink_labels(type_name, spec);
    let (mut ports, next) = select_balanced(pool, type_name, labels.len(), cursor, Direction::Descending)?;
    ports.sort_unstable();
    tracing::debug!("{}: balanced over slices, ports {:?}", type_name, ports);
    pool.claim_all(type_name, &ports, labels)?;
    Ok(next)
}
