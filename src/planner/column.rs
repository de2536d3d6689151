use std::cmp::Reverse;

use crate::models::{NodeSpec, Side, UplinkSpec};

use super::error::{PlanError, PlanResult};
use super::labels::{breakout_labels, node_indices, node_labels, reserved_labels, uplink_labels};
use super::pool::PortPool;
use super::sequential::{block_len, no_block};

/// Block starts tried when nothing near the node midpoint is free, best
/// balanced first
pub const CANONICAL_ANCHORS: [u16; 12] = [56, 52, 48, 44, 40, 36, 32, 28, 24, 18, 14, 10];

/// DBox variant whose data nodes alternate one port at a time
pub const DBOX_V1: &str = "V1";

/// Side for the `ordinal`-th (1-based) data node of a spec.
///
/// V1 boxes alternate per node: odd → RIGHT, even → LEFT. Other variants
/// alternate per pair: pairs 1, 3, 5… → RIGHT, pairs 2, 4… → LEFT.
pub fn dbox_side(ordinal: u32, variant: &str) -> Side {
    let unit = if variant.eq_ignore_ascii_case(DBOX_V1) {
        ordinal
    } else {
        ordinal.div_ceil(2)
    };
    if unit % 2 == 1 {
        Side::Right
    } else {
        Side::Left
    }
}

fn side_order(pool: &PortPool, side: Side) -> Vec<u16> {
    let (left, right) = pool.topology().halves();
    match side {
        Side::Left => left,
        Side::Right => right,
    }
}

/// Next `n` free ports on one half, in that half's consumption order
fn take_side(pool: &PortPool, type_name: &str, side: Side, n: usize) -> PlanResult<Vec<u16>> {
    let ports: Vec<u16> = side_order(pool, side)
        .into_iter()
        .filter(|p| pool.is_free(*p))
        .take(n)
        .collect();
    if ports.len() < n {
        return Err(PlanError::capacity(
            type_name,
            format!("{:?} half has {} free ports, {} needed", side, ports.len(), n),
        ));
    }
    Ok(ports)
}

/// Place data nodes alternating between halves by DBox variant. Breakout
/// groups are formed from consecutive members of each side's own sequence.
/// Reserved ports alternate RIGHT, LEFT, RIGHT, ….
pub fn place_data_nodes(
    pool: &mut PortPool,
    type_name: &str,
    spec: &NodeSpec,
    variant: &str,
) -> PlanResult<()> {
    let mut right = Vec::new();
    let mut left = Vec::new();
    for (ordinal, index) in (1..=spec.count).zip(node_indices(spec)) {
        match dbox_side(ordinal, variant) {
            Side::Right => right.push(index),
            Side::Left => left.push(index),
        }
    }

    for (side, indices) in [(Side::Right, right), (Side::Left, left)] {
        let labels = breakout_labels(type_name, &indices, spec.breakout());
        let ports = take_side(pool, type_name, side, labels.len())?;
        let columns: Vec<u16> = ports.iter().map(|p| pool.topology().column_of(*p)).collect();
        tracing::debug!("{}: {:?} half ports {:?} in columns {:?}", type_name, side, ports, columns);
        pool.claim_all(type_name, &ports, labels)?;
    }

    for k in 0..spec.reserved {
        let side = if k % 2 == 0 { Side::Right } else { Side::Left };
        let ports = take_side(pool, type_name, side, 1)?;
        pool.claim_all(type_name, &ports, reserved_labels(type_name, 1))?;
    }
    Ok(())
}

/// Place a node type entirely on its declared half
pub fn place_side_node(pool: &mut PortPool, type_name: &str, spec: &NodeSpec) -> PlanResult<()> {
    let labels = node_labels(type_name, spec);
    let ports = take_side(pool, type_name, spec.side, labels.len())?;
    tracing::debug!("{}: {:?} half ports {:?}", type_name, spec.side, ports);
    pool.claim_all(type_name, &ports, labels)
}

/// Place an uplink type on a contiguous block centered between the node
/// ports, handing the block out group by group in ascending order
pub fn place_centered_uplink(pool: &mut PortPool, type_name: &str, spec: &UplinkSpec) -> PlanResult<()> {
    let labels = uplink_labels(type_name, spec);
    let len = block_len(type_name, &labels)?;
    if len == 0 {
        return Ok(());
    }
    let start = centered_start(pool, len).ok_or_else(|| no_block(pool, type_name, len))?;
    let ports: Vec<u16> = (start..start + len).collect();
    tracing::debug!("{}: centered block {}-{}", type_name, start, start + len - 1);
    pool.claim_all(type_name, &ports, labels)
}

/// Pick the start of a free `len`-port block for centered uplinks.
///
/// Candidates whose center lies within a quarter of the switch from the node
/// midpoint are scored `balance * 1000 + distance`, where balance is the
/// difference between free ports below and above the block. Distances are
/// kept in half ports, so the balance weight doubles to match. Equal scores
/// prefer the higher block. With no candidate in range the canonical anchors
/// are scored the same way, and after that the highest free block wins.
pub fn centered_start(pool: &PortPool, len: u16) -> Option<u16> {
    let port_count = pool.topology().port_count;
    if len == 0 || len > port_count {
        return None;
    }
    let target = match pool.node_span() {
        Some((low, high)) => low as i64 + high as i64,
        None => 1 + port_count as i64,
    };
    let window = port_count as i64 / 2;
    let free: Vec<u16> = pool.free_ports().collect();

    let score = |start: u16| -> i64 {
        let end = start + len - 1;
        let below = free.iter().filter(|p| **p < start).count() as i64;
        let above = free.iter().filter(|p| **p > end).count() as i64;
        let distance = (start as i64 + end as i64 - target).abs();
        (below - above).abs() * 2000 + distance
    };

    let in_window = (1..=port_count - len + 1)
        .filter(|s| (2 * *s as i64 + len as i64 - 1 - target).abs() <= window)
        .filter(|s| pool.block_free(*s, len));
    if let Some(start) = best_start(in_window, &score) {
        return Some(start);
    }

    let anchors = CANONICAL_ANCHORS
        .iter()
        .copied()
        .filter(|a| pool.block_free(*a, len));
    if let Some(start) = best_start(anchors, &score) {
        tracing::debug!("centered search found no block of {}, using anchor {}", len, start);
        return Some(start);
    }

    pool.highest_block(len)
}

fn best_start(candidates: impl Iterator<Item = u16>, score: impl Fn(u16) -> i64) -> Option<u16> {
    candidates.min_by_key(|start| (score(*start), Reverse(*start)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::{PortLabel, PortMap};

    fn labels(map: &PortMap, ports: &[u16]) -> Vec<String> {
        ports
            .iter()
            .map(|p| map.get(*p).map(|a| a.label.to_string()).unwrap_or_default())
            .collect()
    }

    fn filler() -> PortLabel {
        PortLabel::Reserved { type_name: "X".into() }
    }

    #[test]
    fn test_dbox_alternation() {
        let right_v1: Vec<u32> = (1..=6).filter(|i| dbox_side(*i, "V1") == Side::Right).collect();
        assert_eq!(right_v1, vec![1, 3, 5]);
        let right_v2: Vec<u32> = (1..=6).filter(|i| dbox_side(*i, "V2") == Side::Right).collect();
        let left_v2: Vec<u32> = (1..=6).filter(|i| dbox_side(*i, "V2") == Side::Left).collect();
        assert_eq!(right_v2, vec![1, 2, 5, 6]);
        assert_eq!(left_v2, vec![3, 4]);
    }

    #[test]
    fn test_data_nodes_v1() {
        let sw = catalog::topology("nvidia-sn5600").unwrap();
        let mut pool = PortPool::new(sw);
        place_data_nodes(&mut pool, "DN", &NodeSpec::new(6), "V1").unwrap();
        let map = pool.into_map();
        assert_eq!(labels(&map, &[64, 63, 62]), vec!["DN-1", "DN-3", "DN-5"]);
        assert_eq!(labels(&map, &[1, 2, 3]), vec!["DN-2", "DN-4", "DN-6"]);
    }

    #[test]
    fn test_data_nodes_paired_split_and_reserved() {
        let sw = catalog::topology("nvidia-sn3700").unwrap();
        let mut pool = PortPool::new(sw);
        let spec = NodeSpec { split: true, factor: 2, reserved: 3, ..NodeSpec::new(8) };
        place_data_nodes(&mut pool, "DN", &spec, "V2").unwrap();
        let map = pool.into_map();
        // RIGHT sequence 1,2,5,6 / LEFT sequence 3,4,7,8
        assert_eq!(labels(&map, &[32, 31]), vec!["DN-1/2", "DN-5/6"]);
        assert_eq!(labels(&map, &[1, 2]), vec!["DN-3/4", "DN-7/8"]);
        assert_eq!(labels(&map, &[30, 3, 29]), vec!["RSVD-DN", "RSVD-DN", "RSVD-DN"]);
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn test_side_node() {
        let sw = catalog::topology("nvidia-sn3700").unwrap();
        let mut pool = PortPool::new(sw);
        let spec = NodeSpec { side: Side::Right, reserved: 1, ..NodeSpec::new(2) };
        place_side_node(&mut pool, "CN", &spec).unwrap();
        let map = pool.into_map();
        assert_eq!(labels(&map, &[32, 31, 30]), vec!["CN-1", "CN-2", "RSVD-CN"]);
    }

    #[test]
    fn test_side_overflow() {
        let sw = catalog::topology("nvidia-sn3700").unwrap();
        let mut pool = PortPool::new(sw);
        let err = place_side_node(&mut pool, "CN", &NodeSpec::new(17)).unwrap_err();
        assert!(err.to_string().contains("16 free ports, 17 needed"));
    }

    #[test]
    fn test_uplink_centers_between_nodes() {
        let sw = catalog::topology("nvidia-sn5600").unwrap();
        let mut pool = PortPool::new(sw);
        place_data_nodes(&mut pool, "DN", &NodeSpec::new(6), "V1").unwrap();
        place_centered_uplink(&mut pool, "ISL", &UplinkSpec::new(1, 4)).unwrap();
        let map = pool.into_map();
        assert_eq!(labels(&map, &[31, 32, 33, 34]), vec!["ISL-1", "ISL-2", "ISL-3", "ISL-4"]);
    }

    #[test]
    fn test_uplink_falls_back_to_anchor() {
        let sw = catalog::topology("nvidia-sn5600").unwrap();
        let mut pool = PortPool::new(sw);
        pool.claim(1, PortLabel::Node { type_name: "CN".into(), first: 1, last: 1 }).unwrap();
        pool.claim(64, PortLabel::Node { type_name: "CN".into(), first: 2, last: 2 }).unwrap();
        for port in 15..=50 {
            pool.claim(port, filler()).unwrap();
        }
        // anchors 52 and 10 tie on score; the higher block wins
        assert_eq!(centered_start(&pool, 4), Some(52));
    }

    #[test]
    fn test_uplink_falls_back_to_top_down_scan() {
        let sw = catalog::topology("nvidia-sn3700").unwrap();
        let mut pool = PortPool::new(sw);
        pool.claim(1, PortLabel::Node { type_name: "CN".into(), first: 1, last: 1 }).unwrap();
        pool.claim(32, PortLabel::Node { type_name: "CN".into(), first: 2, last: 2 }).unwrap();
        for port in (2..=29).chain(std::iter::once(31)) {
            pool.claim(port, filler()).unwrap();
        }
        assert_eq!(centered_start(&pool, 1), Some(30));
        assert_eq!(centered_start(&pool, 2), None);
    }
}
