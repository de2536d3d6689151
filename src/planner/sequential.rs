use crate::models::{NodeSpec, PortLabel, UplinkSpec};

use super::error::{PlanError, PlanResult};
use super::labels::{node_labels, uplink_labels};
use super::pool::PortPool;

/// Place a node type on the lowest free contiguous block. With an anchor the
/// block starts exactly at the anchor port.
pub fn place_node(
    pool: &mut PortPool,
    type_name: &str,
    spec: &NodeSpec,
    anchor: Option<u16>,
) -> PlanResult<()> {
    let labels = node_labels(type_name, spec);
    let len = block_len(type_name, &labels)?;
    if len == 0 {
        return Ok(());
    }
    let start = match anchor {
        Some(low) => anchored_block(pool, type_name, low as u32, len)?,
        None => pool.lowest_block(len).ok_or_else(|| no_block(pool, type_name, len))?,
    };
    let ports: Vec<u16> = (start..start + len).collect();
    tracing::debug!("{}: ports {}-{}", type_name, start, start + len - 1);
    pool.claim_all(type_name, &ports, labels)
}

/// Place an uplink type on the highest free contiguous block. With an anchor
/// the block ends exactly at the anchor port. Group 1 takes the lowest part
/// of the block.
pub fn place_uplink(
    pool: &mut PortPool,
    type_name: &str,
    spec: &UplinkSpec,
    anchor: Option<u16>,
) -> PlanResult<()> {
    let labels = uplink_labels(type_name, spec);
    let len = block_len(type_name, &labels)?;
    if len == 0 {
        return Ok(());
    }
    let start = match anchor {
        Some(high) => {
            let low = high as i64 - len as i64 + 1;
            if low < 1 {
                return Err(PlanError::capacity(
                    type_name,
                    format!("{} ports do not fit below anchor port {}", len, high),
                ));
            }
            anchored_block(pool, type_name, low as u32, len)?
        }
        None => pool.highest_block(len).ok_or_else(|| no_block(pool, type_name, len))?,
    };
    let ports: Vec<u16> = (start..start + len).collect();
    tracing::debug!("{}: ports {}-{}", type_name, start, start + len - 1);
    pool.claim_all(type_name, &ports, labels)
}

pub(super) fn block_len(type_name: &str, labels: &[PortLabel]) -> PlanResult<u16> {
    u16::try_from(labels.len()).map_err(|_| {
        PlanError::capacity(type_name, format!("{} ports is more than any switch has", labels.len()))
    })
}

pub(super) fn no_block(pool: &PortPool, type_name: &str, len: u16) -> PlanError {
    PlanError::capacity(
        type_name,
        format!(
            "no contiguous block of {} free ports ({} free on {})",
            len,
            pool.free_count(),
            pool.topology().id
        ),
    )
}

/// Validate a fixed block `start..start+len` and return its start
pub(super) fn anchored_block(pool: &PortPool, type_name: &str, start: u32, len: u16) -> PlanResult<u16> {
    let port_count = pool.topology().port_count as u32;
    let end = start + len as u32 - 1;
    if start == 0 || end > port_count {
        return Err(PlanError::capacity(
            type_name,
            format!("block {}-{} runs past port {}", start, end, port_count),
        ));
    }
    for port in start as u16..=end as u16 {
        if let Some(owner) = pool.owner(port) {
            return Err(PlanError::OverlapConflict {
                port,
                first: owner.type_name().to_string(),
                second: type_name.to_string(),
            });
        }
    }
    Ok(start as u16)
}
