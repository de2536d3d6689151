use std::collections::{BTreeMap, BTreeSet};

use regex_lite::Regex;

use crate::models::SwitchTopology;

use super::error::PlanError;

/// ManualPorts is a parsed manual override string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualPorts {
    /// No override, placement is automatic
    Auto,
    /// Single port used as the start of an automatic fill
    Anchor(u16),
    /// Exact ports, sorted and deduplicated
    Explicit(Vec<u16>),
}

/// Parse a manual override: empty, a bare port number, or a list of ports
/// and `a-b` ranges separated by commas (e.g. "1-4,9,12-13").
pub fn parse_manual_ports(input: &str) -> Result<ManualPorts, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(ManualPorts::Auto);
    }
    if let Ok(anchor) = input.parse::<u16>() {
        if anchor == 0 {
            return Err("port numbers start at 1".to_string());
        }
        return Ok(ManualPorts::Anchor(anchor));
    }

    let token_re = Regex::new(r"^(\d+)(?:\s*-\s*(\d+))?$").map_err(|e| e.to_string())?;
    let mut ports = BTreeSet::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let caps = token_re
            .captures(token)
            .ok_or_else(|| format!("cannot parse '{}' as a port or range", token))?;
        let low = parse_port(&caps[1])?;
        let high = match caps.get(2) {
            Some(m) => parse_port(m.as_str())?,
            None => low,
        };
        if low > high {
            return Err(format!("range {}-{} is inverted", low, high));
        }
        ports.extend(low..=high);
    }
    if ports.is_empty() {
        return Err(format!("no ports in '{}'", input));
    }
    Ok(ManualPorts::Explicit(ports.into_iter().collect()))
}

fn parse_port(digits: &str) -> Result<u16, String> {
    match digits.parse::<u16>() {
        Ok(0) => Err("port numbers start at 1".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("port {} is out of range", digits)),
    }
}

/// Check an explicit list against the ports a type actually needs
pub fn validate_explicit(
    type_name: &str,
    ports: &[u16],
    required: u64,
    topology: &SwitchTopology,
) -> Vec<PlanError> {
    let mut errors = Vec::new();
    if ports.len() as u64 != required {
        errors.push(PlanError::invalid(
            type_name,
            format!(
                "manual ports list {} ports but {} are required",
                ports.len(),
                required
            ),
        ));
    }
    let outside: Vec<String> = ports
        .iter()
        .filter(|p| !topology.contains(**p))
        .map(|p| p.to_string())
        .collect();
    if !outside.is_empty() {
        errors.push(PlanError::invalid(
            type_name,
            format!(
                "manual ports {} are outside 1..{} on {}",
                outside.join(","),
                topology.port_count,
                topology.id
            ),
        ));
    }
    errors
}

/// Report every port claimed by more than one owner. `claims` are checked
/// in order, so `first` in each error is the earlier claimant.
pub fn find_overlaps<'a>(claims: impl IntoIterator<Item = (&'a str, &'a [u16])>) -> Vec<PlanError> {
    let mut owners: BTreeMap<u16, &str> = BTreeMap::new();
    let mut errors = Vec::new();
    for (type_name, ports) in claims {
        for port in ports {
            match owners.get(port) {
                Some(first) => errors.push(PlanError::OverlapConflict {
                    port: *port,
                    first: first.to_string(),
                    second: type_name.to_string(),
                }),
                None => {
                    owners.insert(*port, type_name);
                }
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_manual_ports("  "), Ok(ManualPorts::Auto));
        assert_eq!(parse_manual_ports("17"), Ok(ManualPorts::Anchor(17)));
        assert_eq!(
            parse_manual_ports("5, 1-3,2 ,9-9"),
            Ok(ManualPorts::Explicit(vec![1, 2, 3, 5, 9]))
        );
        assert_eq!(
            parse_manual_ports("3-4,"),
            Ok(ManualPorts::Explicit(vec![3, 4]))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_manual_ports("4-2").unwrap_err().contains("inverted"));
        assert!(parse_manual_ports("1,x").is_err());
        assert!(parse_manual_ports("0").is_err());
        assert!(parse_manual_ports("0-3").is_err());
        assert!(parse_manual_ports(",").is_err());
        assert!(parse_manual_ports("1,99999").is_err());
    }

    #[test]
    fn test_count_mismatch() {
        let sw = catalog::topology("nvidia-sn5600").unwrap();
        let errors = validate_explicit("CN", &[1, 2, 3], 4, sw);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), "input_validation");
        assert!(errors[0].to_string().contains("3 ports but 4"));
        assert!(validate_explicit("CN", &[1, 2, 3, 4], 4, sw).is_empty());
    }

    #[test]
    fn test_out_of_range() {
        let sw = catalog::topology("nvidia-sn3700").unwrap();
        let errors = validate_explicit("DN", &[31, 32, 33], 3, sw);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("33"));
    }

    #[test]
    fn test_overlaps() {
        let cn = [1u16, 2, 3];
        let dn = [3u16, 4];
        let isl = [4u16, 60];
        let errors = find_overlaps([("CN", &cn[..]), ("DN", &dn[..]), ("ISL", &isl[..])]);
        assert_eq!(
            errors,
            vec![
                PlanError::OverlapConflict { port: 3, first: "CN".into(), second: "DN".into() },
                PlanError::OverlapConflict { port: 4, first: "DN".into(), second: "ISL".into() },
            ]
        );
    }
}
