mod balanced;
mod column;
mod error;
mod labels;
mod manual;
mod pool;
mod sequential;

use std::collections::BTreeMap;

pub use error::{ErrorSet, PlanError};

use manual::{find_overlaps, parse_manual_ports, validate_explicit, ManualPorts};
use pool::PortPool;

use crate::catalog;
use crate::models::{
    NodeSpec, PlanMode, PlanOutcome, PlanRequest, PortAssignment, SpecSet, SwitchTopology,
    UplinkSpec, DATA_NODE, NORTHBOUND,
};

/// DBox variant assumed when a request does not name one
pub const DEFAULT_DBOX_VARIANT: &str = "V2";

/// Resolve the request's switch model and plan it
pub fn plan_request(request: &PlanRequest) -> Result<PlanOutcome, ErrorSet> {
    let topology = catalog::topology(&request.topology_id)?;
    plan(topology, request)
}

/// Compute a complete port map for one switch.
///
/// This is a pure function of the switch model and one snapshot of port
/// requests. Order of work: pick up locked types from the previous map,
/// validate every other spec and its manual override, claim locked and
/// explicit manual ports, then place the remaining types automatically
/// (nodes first, then uplinks). The strategy is chosen per request: column
/// routing in advanced mode, balanced slices where the switch model asks for
/// them, sequential fill otherwise. Every check runs against a scratch pool
/// and the map is only returned when no error was recorded.
pub fn plan(topology: &SwitchTopology, request: &PlanRequest) -> Result<PlanOutcome, ErrorSet> {
    let specs = &request.specs;
    let mut errors = ErrorSet::new();

    if request.mode == PlanMode::Advanced && !topology.column_router_eligible {
        errors.push(PlanError::invalid(
            topology.id,
            "switch model does not support column routing",
        ));
    }

    // Locked types keep their previous ports verbatim
    let mut locked: BTreeMap<(Kind, &str), Vec<PortAssignment>> = BTreeMap::new();
    let locked_names = specs
        .node_types
        .iter()
        .filter(|(_, s)| s.locked)
        .map(|(n, _)| (Kind::Node, n.as_str()))
        .chain(
            specs
                .uplink_types
                .iter()
                .filter(|(_, s)| s.locked)
                .map(|(n, _)| (Kind::Uplink, n.as_str())),
        );
    for key in locked_names {
        let previous: Vec<PortAssignment> = request.locked.for_type(key.1).cloned().collect();
        if previous.is_empty() {
            tracing::debug!("{}: locked but no previous ports, allocating fresh", key.1);
        } else {
            locked.insert(key, previous);
        }
    }

    // Per-type checks and manual overrides. Types carried over from the
    // previous map skip both.
    let mut overrides: BTreeMap<(Kind, &str), ManualPorts> = BTreeMap::new();
    let mut required: u64 = locked.values().map(|v| v.len() as u64).sum();
    let mut oversized = false;
    let unlocked_nodes = specs
        .node_types
        .iter()
        .filter(|(n, _)| !locked.contains_key(&(Kind::Node, n.as_str())))
        .map(|(n, s)| {
            let checks = validate_node(n, s);
            (Kind::Node, n.as_str(), checks, &s.manual_ports, s.required_ports())
        });
    let unlocked_uplinks = specs
        .uplink_types
        .iter()
        .filter(|(n, _)| !locked.contains_key(&(Kind::Uplink, n.as_str())))
        .map(|(n, s)| {
            let checks = validate_uplink(n, s);
            (Kind::Uplink, n.as_str(), checks, &s.manual_ports, s.required_ports())
        });
    let unlocked = unlocked_nodes.chain(unlocked_uplinks);
    for (kind, name, spec_errors, manual_ports, type_required) in unlocked {
        errors.extend(spec_errors);
        required = required.saturating_add(type_required);
        if type_required > topology.port_count as u64 {
            oversized = true;
            errors.push(PlanError::capacity(
                name,
                format!(
                    "needs {} ports but the switch has {}",
                    type_required, topology.port_count
                ),
            ));
            continue;
        }
        match parse_manual_ports(manual_ports) {
            Ok(manual) => {
                if let ManualPorts::Explicit(ports) = &manual {
                    errors.extend(validate_explicit(name, ports, type_required, topology));
                }
                overrides.insert((kind, name), manual);
            }
            Err(reason) => errors.push(PlanError::invalid(name, reason)),
        }
    }

    if !oversized && required > topology.port_count as u64 {
        errors.push(PlanError::capacity(
            topology.id,
            format!(
                "{} ports requested but the switch has {}",
                required, topology.port_count
            ),
        ));
    }

    let locked_ports: Vec<(&str, Vec<u16>)> = locked
        .iter()
        .map(|((_, name), a)| (*name, a.iter().map(|a| a.port).collect()))
        .collect();
    let explicit: Vec<(Kind, &str, &[u16])> = overrides
        .iter()
        .filter_map(|((kind, name), manual)| match manual {
            ManualPorts::Explicit(ports) => Some((*kind, *name, ports.as_slice())),
            _ => None,
        })
        .collect();
    errors.extend(find_overlaps(
        locked_ports
            .iter()
            .map(|(name, ports)| (*name, ports.as_slice()))
            .chain(explicit.iter().map(|(_, name, ports)| (*name, *ports))),
    ));

    if let Err(errors) = errors.into_result() {
        tracing::warn!("plan for {} rejected during validation: {}", topology.id, errors);
        return Err(errors);
    }

    let mut errors = ErrorSet::new();

    let mut pool = PortPool::new(topology);
    for assignments in locked.values() {
        for a in assignments {
            if let Err(e) = pool.claim(a.port, a.label.clone()) {
                errors.push(e);
            }
        }
    }
    for (kind, name, ports) in &explicit {
        let labels = match kind {
            Kind::Node => labels::node_labels(name, &specs.node_types[*name]),
            Kind::Uplink => labels::uplink_labels(name, &specs.uplink_types[*name]),
        };
        if let Err(e) = pool.claim_all(name, ports, labels) {
            errors.push(e);
        }
    }

    let variant = request
        .dbox_variant
        .as_deref()
        .unwrap_or(DEFAULT_DBOX_VARIANT);
    let advanced = request.mode == PlanMode::Advanced;
    let mut cursor = request.cursor;

    for (name, spec) in node_order(specs, advanced) {
        let key = (Kind::Node, name);
        if locked.contains_key(&key) {
            continue;
        }
        let anchor = match overrides.get(&key) {
            Some(ManualPorts::Explicit(_)) => continue,
            Some(ManualPorts::Anchor(port)) => Some(*port),
            _ => None,
        };
        let placed = match anchor {
            Some(port) => sequential::place_node(&mut pool, name, spec, Some(port)),
            None if advanced && name == DATA_NODE => {
                column::place_data_nodes(&mut pool, name, spec, variant)
            }
            None if advanced => column::place_side_node(&mut pool, name, spec),
            None if topology.balanced_node => {
                balanced::place_node(&mut pool, name, spec, cursor).map(|next| cursor = next)
            }
            None => sequential::place_node(&mut pool, name, spec, None),
        };
        if let Err(e) = placed {
            errors.push(e);
        }
    }

    for (name, spec) in &specs.uplink_types {
        let key = (Kind::Uplink, name.as_str());
        if locked.contains_key(&key) {
            continue;
        }
        let anchor = match overrides.get(&key) {
            Some(ManualPorts::Explicit(_)) => continue,
            Some(ManualPorts::Anchor(port)) => Some(*port),
            _ => None,
        };
        let placed = match anchor {
            Some(port) => sequential::place_uplink(&mut pool, name, spec, Some(port)),
            None if advanced => column::place_centered_uplink(&mut pool, name, spec),
            None if topology.balanced_uplink => {
                balanced::place_uplink(&mut pool, name, spec, cursor).map(|next| cursor = next)
            }
            None => sequential::place_uplink(&mut pool, name, spec, None),
        };
        if let Err(e) = placed {
            errors.push(e);
        }
    }

    if let Err(errors) = errors.into_result() {
        tracing::warn!("plan for {} rejected during placement: {}", topology.id, errors);
        return Err(errors);
    }

    let port_map = pool.into_map();
    tracing::debug!("planned {} of {} ports on {}", port_map.len(), topology.port_count, topology.id);
    Ok(PlanOutcome { port_map, cursor })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Node,
    Uplink,
}

/// Node types in placement order. Column routing places data nodes first so
/// the alternating pattern starts from the outer ports.
fn node_order(specs: &SpecSet, advanced: bool) -> Vec<(&str, &NodeSpec)> {
    let mut order: Vec<(&str, &NodeSpec)> = specs
        .node_types
        .iter()
        .map(|(name, spec)| (name.as_str(), spec))
        .collect();
    if advanced {
        order.sort_by_key(|(name, _)| *name != DATA_NODE);
    }
    order
}

fn validate_factor(type_name: &str, split: bool, factor: u32) -> Option<PlanError> {
    (split && factor != 2 && factor != 4).then(|| {
        PlanError::invalid(type_name, format!("split factor must be 2 or 4, got {}", factor))
    })
}

fn validate_node(type_name: &str, spec: &NodeSpec) -> Vec<PlanError> {
    let mut errors: Vec<PlanError> = validate_factor(type_name, spec.split, spec.factor)
        .into_iter()
        .collect();
    if spec.starting_index == 0 {
        errors.push(PlanError::invalid(type_name, "starting index must be at least 1"));
    }
    if spec.count > 0 && spec.starting_index.checked_add(spec.count - 1).is_none() {
        errors.push(PlanError::invalid(
            type_name,
            format!(
                "{} nodes starting at {} run past the highest index {}",
                spec.count,
                spec.starting_index,
                u32::MAX
            ),
        ));
    }
    errors
}

fn validate_uplink(type_name: &str, spec: &UplinkSpec) -> Vec<PlanError> {
    let mut errors: Vec<PlanError> = validate_factor(type_name, spec.split, spec.factor)
        .into_iter()
        .collect();
    if spec.origins.is_empty() {
        return errors;
    }
    if type_name != NORTHBOUND {
        errors.push(PlanError::invalid(
            type_name,
            format!("only {} uplinks take node origins", NORTHBOUND),
        ));
    }
    if let Some(origin) = spec.origins.iter().find(|o| o.category.trim().is_empty()) {
        errors.push(PlanError::invalid(
            type_name,
            format!("origin with {} ports has no category", origin.ports),
        ));
    }
    let origin_ports: u64 = spec.origins.iter().map(|o| o.ports as u64).sum();
    let cabled = spec.cabled_per_group() as u64 * spec.groups as u64;
    if origin_ports != cabled {
        errors.push(PlanError::invalid(
            type_name,
            format!(
                "origins cover {} ports but {} cabled ports are requested",
                origin_ports, cabled
            ),
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NorthboundOrigin, PortLabel, PortMap, Side, SliceCursor};

    fn request(topology_id: &str, specs: SpecSet) -> PlanRequest {
        PlanRequest {
            topology_id: topology_id.to_string(),
            specs,
            ..Default::default()
        }
    }

    fn rendered(map: &PortMap) -> Vec<(u16, String)> {
        map.iter().map(|a| (a.port, a.label.to_string())).collect()
    }

    #[test]
    fn test_end_to_end_sequential() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(4))
            .with_uplink("ISL", UplinkSpec::new(1, 4));
        let outcome = plan_request(&request("nvidia-sn5600", specs)).unwrap();
        let labels = rendered(&outcome.port_map);
        assert_eq!(
            labels,
            vec![
                (1, "CN-1".to_string()),
                (2, "CN-2".to_string()),
                (3, "CN-3".to_string()),
                (4, "CN-4".to_string()),
                (61, "ISL-1".to_string()),
                (62, "ISL-2".to_string()),
                (63, "ISL-3".to_string()),
                (64, "ISL-4".to_string()),
            ]
        );
    }

    #[test]
    fn test_uniqueness_capacity_and_determinism() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec { split: true, factor: 2, reserved: 1, ..NodeSpec::new(20) })
            .with_node("DN", NodeSpec { reserved: 2, ..NodeSpec::new(12) })
            .with_uplink("ISL", UplinkSpec::new(2, 4))
            .with_uplink("EXT", UplinkSpec { reserved: 1, ..UplinkSpec::new(2, 3) });
        let req = request("nvidia-sn5600", specs);
        let first = plan_request(&req).unwrap();
        let second = plan_request(&req).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.port_map.ports().len(), first.port_map.len());
        assert_eq!(first.port_map.len(), 11 + 14 + 8 + 8);
        assert!(first.port_map.len() <= 64);
    }

    #[test]
    fn test_manual_mismatch_rejects_everything() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec { manual_ports: "1-3".into(), ..NodeSpec::new(4) })
            .with_node("DN", NodeSpec::new(2));
        let errs = plan_request(&request("nvidia-sn5600", specs)).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.errors()[0].kind(), "input_validation");
        assert!(errs.to_string().contains("3 ports but 4 are required"));
    }

    #[test]
    fn test_manual_explicit_ports_and_automatic_fill_around_them() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec { manual_ports: "2,4-5".into(), ..NodeSpec::new(3) })
            .with_node("DN", NodeSpec::new(2));
        let outcome = plan_request(&request("nvidia-sn3700", specs)).unwrap();
        assert_eq!(
            rendered(&outcome.port_map),
            vec![
                (2, "CN-1".to_string()),
                (4, "CN-2".to_string()),
                (5, "CN-3".to_string()),
                (6, "DN-1".to_string()),
                (7, "DN-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_errors_are_batched() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec { manual_ports: "1-4".into(), ..NodeSpec::new(4) })
            .with_node("DN", NodeSpec { manual_ports: "4-5".into(), ..NodeSpec::new(2) })
            .with_node("GN", NodeSpec { manual_ports: "9-7".into(), ..NodeSpec::new(3) })
            .with_uplink("ISL", UplinkSpec { split: true, factor: 3, ..UplinkSpec::new(1, 2) });
        let errs = plan_request(&request("nvidia-sn5600", specs)).unwrap_err();
        let kinds: Vec<&str> = errs.errors().iter().map(PlanError::kind).collect();
        assert_eq!(kinds.len(), 3);
        assert!(kinds.contains(&"overlap_conflict"));
        assert_eq!(kinds.iter().filter(|k| **k == "input_validation").count(), 2);
    }

    #[test]
    fn test_total_capacity() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(30))
            .with_uplink("ISL", UplinkSpec::new(1, 4));
        let errs = plan_request(&request("nvidia-sn3700", specs)).unwrap_err();
        assert!(errs.to_string().contains("34 ports requested but the switch has 32"));
    }

    #[test]
    fn test_huge_count_is_a_capacity_error() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(u32::MAX))
            .with_node("DN", NodeSpec::new(2));
        let errs = plan_request(&request("nvidia-sn5600", specs)).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.errors()[0].kind(), "capacity");
        assert!(errs.to_string().contains("CN: needs 4294967295 ports but the switch has 64"));
    }

    #[test]
    fn test_counts_that_would_wrap_are_rejected() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(1 << 31))
            .with_node("DN", NodeSpec::new(1 << 31));
        let errs = plan_request(&request("nvidia-sn5600", specs)).unwrap_err();
        let kinds: Vec<&str> = errs.errors().iter().map(PlanError::kind).collect();
        assert_eq!(kinds, vec!["capacity", "capacity"]);
    }

    #[test]
    fn test_starting_index_past_u32_max() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec { starting_index: u32::MAX, ..NodeSpec::new(2) });
        let errs = plan_request(&request("nvidia-sn5600", specs)).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.errors()[0].kind(), "input_validation");
        assert!(errs.to_string().contains("run past the highest index"));

        let last = SpecSet::default()
            .with_node("CN", NodeSpec { starting_index: u32::MAX, ..NodeSpec::new(1) });
        let outcome = plan_request(&request("nvidia-sn5600", last)).unwrap();
        assert_eq!(outcome.port_map.get(1).unwrap().label.to_string(), "CN-4294967295");
    }

    #[test]
    fn test_huge_group_count_is_a_capacity_error() {
        let specs = SpecSet::default().with_uplink("ISL", UplinkSpec::new(u32::MAX, 2));
        let errs = plan_request(&request("nvidia-sn5600", specs)).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.errors()[0].kind(), "capacity");
        assert!(errs.to_string().starts_with("ISL: needs 8589934590 ports"));
    }

    #[test]
    fn test_unknown_topology() {
        let errs = plan_request(&request("nope", SpecSet::default())).unwrap_err();
        assert_eq!(errs.errors(), &[PlanError::UnknownTopology("nope".into())]);
    }

    #[test]
    fn test_locked_ports_survive_recompute() {
        let mut previous = PortMap::new();
        for (port, n) in [(10u16, 1u32), (11, 2)] {
            previous
                .insert(PortAssignment::new(
                    port,
                    PortLabel::Node { type_name: "DN".into(), first: n, last: n },
                ))
                .unwrap();
        }
        previous
            .insert(PortAssignment::new(
                1,
                PortLabel::Node { type_name: "CN".into(), first: 1, last: 1 },
            ))
            .unwrap();
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(3))
            .with_node("DN", NodeSpec { locked: true, ..NodeSpec::new(2) });
        let req = PlanRequest { locked: previous, ..request("nvidia-sn3700", specs) };
        let outcome = plan_request(&req).unwrap();
        assert_eq!(
            rendered(&outcome.port_map),
            vec![
                (1, "CN-1".to_string()),
                (2, "CN-2".to_string()),
                (3, "CN-3".to_string()),
                (10, "DN-1".to_string()),
                (11, "DN-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_locked_type_ignores_stale_manual_ports() {
        let mut previous = PortMap::new();
        for (port, n) in [(10u16, 1u32), (11, 2)] {
            previous
                .insert(PortAssignment::new(
                    port,
                    PortLabel::Node { type_name: "DN".into(), first: n, last: n },
                ))
                .unwrap();
        }
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(3))
            .with_node("DN", NodeSpec { locked: true, manual_ports: "1-3".into(), ..NodeSpec::new(2) });
        let req = PlanRequest { locked: previous, ..request("nvidia-sn3700", specs) };
        let outcome = plan_request(&req).unwrap();
        let ports: Vec<u16> = outcome.port_map.ports().into_iter().collect();
        assert_eq!(ports, vec![1, 2, 3, 10, 11]);
        assert_eq!(outcome.port_map.get(10).unwrap().label.to_string(), "DN-1");
    }

    #[test]
    fn test_manual_port_on_locked_port_conflicts() {
        let mut previous = PortMap::new();
        previous
            .insert(PortAssignment::new(5, PortLabel::Reserved { type_name: "DN".into() }))
            .unwrap();
        let specs = SpecSet::default()
            .with_node("DN", NodeSpec { locked: true, reserved: 1, ..NodeSpec::new(0) })
            .with_node("CN", NodeSpec { manual_ports: "5-6".into(), ..NodeSpec::new(2) });
        let req = PlanRequest { locked: previous, ..request("nvidia-sn3700", specs) };
        let errs = plan_request(&req).unwrap_err();
        assert_eq!(
            errs.errors(),
            &[PlanError::OverlapConflict { port: 5, first: "DN".into(), second: "CN".into() }]
        );
    }

    #[test]
    fn test_balanced_switch_uses_slices_and_returns_cursor() {
        let specs = SpecSet::default().with_node("CN", NodeSpec::new(16));
        let outcome = plan_request(&request("arista-7060x6-64pe", specs)).unwrap();
        let ports: Vec<u16> = outcome.port_map.ports().into_iter().collect();
        assert_eq!(ports, vec![1, 2, 9, 10, 17, 18, 25, 26, 33, 34, 41, 42, 49, 50, 57, 58]);
        assert_eq!(outcome.cursor, SliceCursor(0));
        assert_eq!(outcome.port_map.get(9).unwrap().label.to_string(), "CN-3");
    }

    #[test]
    fn test_balanced_uplinks_follow_node_cursor() {
        let specs = SpecSet::default()
            .with_node("CN", NodeSpec::new(10))
            .with_uplink("ISL", UplinkSpec::new(2, 3));
        let outcome = plan_request(&request("arista-7060x6-64pe", specs)).unwrap();
        let uplinks: Vec<(u16, String)> = rendered(&outcome.port_map)
            .into_iter()
            .filter(|(_, label)| label.starts_with("ISL"))
            .collect();
        // nodes end on slice 1, so uplinks walk down from slice 2
        assert_eq!(
            uplinks,
            vec![
                (8, "ISL1-1".to_string()),
                (16, "ISL1-2".to_string()),
                (24, "ISL1-3".to_string()),
                (48, "ISL2-1".to_string()),
                (56, "ISL2-2".to_string()),
                (64, "ISL2-3".to_string()),
            ]
        );
        let nodes: Vec<u16> = outcome.port_map.for_type("CN").map(|a| a.port).collect();
        assert_eq!(nodes, vec![1, 2, 9, 10, 17, 25, 33, 41, 49, 57]);
        assert_eq!(outcome.cursor, SliceCursor(4));
    }

    #[test]
    fn test_advanced_mode() {
        let specs = SpecSet::default()
            .with_node("DN", NodeSpec::new(6))
            .with_node("CN", NodeSpec { side: Side::Left, ..NodeSpec::new(2) })
            .with_uplink("ISL", UplinkSpec::new(1, 4));
        let req = PlanRequest {
            mode: PlanMode::Advanced,
            dbox_variant: Some("V1".into()),
            ..request("nvidia-sn5600", specs)
        };
        let outcome = plan_request(&req).unwrap();
        let map = &outcome.port_map;
        let at = |p: u16| map.get(p).map(|a| a.label.to_string()).unwrap_or_default();
        assert_eq!(at(64), "DN-1");
        assert_eq!(at(1), "DN-2");
        assert_eq!(at(4), "CN-1");
        assert_eq!(at(5), "CN-2");
        // 26 free ports on each side of 32-35
        assert_eq!(at(32), "ISL-1");
        assert_eq!(at(35), "ISL-4");
    }

    #[test]
    fn test_advanced_mode_requires_eligible_switch() {
        let mut sw = catalog::topology("nvidia-sn3700").unwrap().clone();
        sw.column_router_eligible = false;
        let req = PlanRequest { mode: PlanMode::Advanced, ..request("nvidia-sn3700", SpecSet::default()) };
        let errs = plan(&sw, &req).unwrap_err();
        assert!(errs.to_string().contains("does not support column routing"));
    }

    #[test]
    fn test_northbound_origins() {
        let nb = UplinkSpec {
            origins: vec![
                NorthboundOrigin { category: "CN".into(), ports: 2 },
                NorthboundOrigin { category: "DN".into(), ports: 2 },
            ],
            ..UplinkSpec::new(1, 4)
        };
        let specs = SpecSet::default().with_uplink("NB", nb);
        let outcome = plan_request(&request("nvidia-sn3700", specs)).unwrap();
        assert_eq!(
            rendered(&outcome.port_map),
            vec![
                (29, "NB-CN-1".to_string()),
                (30, "NB-CN-2".to_string()),
                (31, "NB-DN-1".to_string()),
                (32, "NB-DN-2".to_string()),
            ]
        );

        let bad = UplinkSpec {
            origins: vec![NorthboundOrigin { category: "CN".into(), ports: 3 }],
            ..UplinkSpec::new(1, 4)
        };
        let errs = plan_request(&request("nvidia-sn3700", SpecSet::default().with_uplink("EXT", bad)))
            .unwrap_err();
        assert_eq!(errs.len(), 2);
    }
}
