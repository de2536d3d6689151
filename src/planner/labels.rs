use crate::models::{NodeSpec, PortLabel, UplinkSpec, NORTHBOUND};

/// Group logical indices into breakout ports, one label per physical port
pub fn breakout_labels(type_name: &str, indices: &[u32], breakout: u32) -> Vec<PortLabel> {
    indices
        .chunks(breakout.max(1) as usize)
        .filter_map(|chunk| {
            let first = *chunk.first()?;
            let last = *chunk.last()?;
            Some(PortLabel::Node {
                type_name: type_name.to_string(),
                first,
                last,
            })
        })
        .collect()
}

pub fn reserved_labels(type_name: &str, count: u32) -> Vec<PortLabel> {
    (0..count)
        .map(|_| PortLabel::Reserved { type_name: type_name.to_string() })
        .collect()
}

/// Logical indices of a node type, stopping at `u32::MAX`
pub fn node_indices(spec: &NodeSpec) -> impl Iterator<Item = u32> + '_ {
    (0..spec.count).map_while(|offset| spec.starting_index.checked_add(offset))
}

/// Labels for every physical port of a node type, in allocation order:
/// breakout groups by logical index, then the reserved tail
pub fn node_labels(type_name: &str, spec: &NodeSpec) -> Vec<PortLabel> {
    let indices: Vec<u32> = node_indices(spec).collect();
    let mut labels = breakout_labels(type_name, &indices, spec.breakout());
    labels.extend(reserved_labels(type_name, spec.reserved));
    labels
}

/// Labels for every physical port of an uplink type, group by group. Each
/// group lists its cabled ports followed by its reserved tail. Northbound
/// uplinks with origins hand their cabled ports to each origin in priority
/// order instead of numbering by group.
pub fn uplink_labels(type_name: &str, spec: &UplinkSpec) -> Vec<PortLabel> {
    let factor = spec.split.then_some(spec.breakout());
    let use_origins = type_name == NORTHBOUND && !spec.origins.is_empty();
    let mut origin_slots = spec
        .origins
        .iter()
        .flat_map(|o| (1..=o.ports).map(move |index| (o.category.as_str(), index)));

    let mut labels = Vec::with_capacity(spec.required_ports() as usize);
    for group in 1..=spec.groups {
        for index in 1..=spec.cabled_per_group() {
            let origin_slot = if use_origins { origin_slots.next() } else { None };
            let label = match origin_slot {
                Some((origin, index)) => PortLabel::Northbound {
                    origin: origin.to_string(),
                    index,
                    factor,
                },
                None => PortLabel::UplinkGroup {
                    type_name: type_name.to_string(),
                    group: (spec.groups > 1).then_some(group),
                    index,
                    factor,
                },
            };
            labels.push(label);
        }
        labels.extend(reserved_labels(type_name, spec.reserved));
    }
    labels
}
