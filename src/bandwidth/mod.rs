use std::collections::BTreeMap;

use crate::models::{
    BandwidthGoal, BandwidthSummary, CategoryBandwidth, LinkCategory, PortLabel, PortMap,
    SwitchTopology,
};

/// Uplink types that stay between switches of one fabric
pub const INTER_SWITCH_TYPES: [&str; 3] = ["ISL", "IPL", "MLAG"];

/// Category a port reports under; reserved ports carry no bandwidth
pub fn category_of(label: &PortLabel) -> Option<LinkCategory> {
    if label.is_reserved() {
        return None;
    }
    let type_name = label.type_name();
    let category = if label.is_node() {
        LinkCategory::Node
    } else if INTER_SWITCH_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(type_name))
    {
        LinkCategory::InterSwitch
    } else {
        LinkCategory::External
    };
    Some(category)
}

fn category_name(category: LinkCategory) -> &'static str {
    match category {
        LinkCategory::Node => "Nodes",
        LinkCategory::InterSwitch => "InterSwitch",
        LinkCategory::External => "External",
    }
}

/// Sum link speed per type and per category. Node and inter-switch ports run
/// at the switch's native speed, external ports at `uplink_speed_gbps`. Each
/// figure is compared against the goal on its own; without a goal every
/// comparison passes.
pub fn audit(
    topology: &SwitchTopology,
    port_map: &PortMap,
    goal: Option<BandwidthGoal>,
    uplink_speed_gbps: u32,
) -> BandwidthSummary {
    let goal_gbps = goal.map(|g| g.gbps());
    let speed_of = |category: LinkCategory| match category {
        LinkCategory::External => uplink_speed_gbps,
        LinkCategory::Node | LinkCategory::InterSwitch => topology.native_speed_gbps,
    };

    let mut per_type: BTreeMap<(LinkCategory, &str), u32> = BTreeMap::new();
    for assignment in port_map.iter() {
        if let Some(category) = category_of(&assignment.label) {
            *per_type
                .entry((category, assignment.label.type_name()))
                .or_insert(0) += 1;
        }
    }

    let mut per_category: BTreeMap<LinkCategory, u32> = BTreeMap::new();
    for ((category, _), ports) in &per_type {
        *per_category.entry(*category).or_insert(0) += ports;
    }

    let types = per_type
        .iter()
        .map(|((category, name), ports)| {
            line(name, *category, *ports, speed_of(*category), goal_gbps)
        })
        .collect();
    let categories = per_category
        .iter()
        .map(|(category, ports)| {
            line(
                category_name(*category),
                *category,
                *ports,
                speed_of(*category),
                goal_gbps,
            )
        })
        .collect();

    tracing::debug!(
        "bandwidth audit for {}: {} types, goal {:?} Gb/s",
        topology.id,
        per_type.len(),
        goal_gbps
    );

    BandwidthSummary {
        topology_id: topology.id.to_string(),
        goal_gbps,
        types,
        categories,
    }
}

fn line(
    name: &str,
    category: LinkCategory,
    ports: u32,
    port_speed_gbps: u32,
    goal_gbps: Option<f64>,
) -> CategoryBandwidth {
    let per_switch_gbps = ports as f64 * port_speed_gbps as f64;
    let aggregate_gbps = per_switch_gbps * 2.0;
    let ha_gbps = aggregate_gbps / 2.0;
    let meets = |value: f64| goal_gbps.map_or(true, |goal| value >= goal);
    CategoryBandwidth {
        name: name.to_string(),
        category,
        ports,
        port_speed_gbps,
        per_switch_gbps,
        aggregate_gbps,
        ha_gbps,
        meets_per_switch: meets(per_switch_gbps),
        meets_aggregate: meets(aggregate_gbps),
        meets_ha: meets(ha_gbps),
    }
}
