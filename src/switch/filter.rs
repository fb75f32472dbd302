// file: src/switch/filter.rs
// version: 1.0.0
// guid: c39b2794-c725-47e7-b793-23dd28530330

//! Decides which interfaces may be turned into access ports

use super::models::InterfaceStatus;
use std::cmp::Ordering;
use tracing::trace;

/// Rules an interface must pass to be offered to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRules {
    /// Port name prefixes that are never offered, compared case-insensitively
    pub excluded_prefixes: Vec<String>,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec!["Te".to_string()],
        }
    }
}

impl EligibilityRules {
    pub fn new(excluded_prefixes: Vec<String>) -> Self {
        Self { excluded_prefixes }
    }

    /// Unused, unlabeled and not on an excluded port type
    pub fn is_eligible(&self, interface: &InterfaceStatus) -> bool {
        let port = interface.port.to_lowercase();

        if interface.status.to_lowercase().contains("connected") {
            trace!("{} is connected", interface.port);
            return false;
        }
        if self
            .excluded_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && port.starts_with(&prefix.to_lowercase()))
        {
            trace!("{} has an excluded port prefix", interface.port);
            return false;
        }
        if !interface.description.trim().is_empty() {
            trace!("{} has a description", interface.port);
            return false;
        }
        true
    }
}

/// Eligible port names, de-duplicated and in natural order
pub fn eligible_interfaces(interfaces: &[InterfaceStatus], rules: &EligibilityRules) -> Vec<String> {
    let mut ports: Vec<String> = interfaces
        .iter()
        .filter(|interface| rules.is_eligible(interface))
        .map(|interface| interface.port.clone())
        .collect();
    ports.sort_by(|a, b| natural_cmp(a, b));
    ports.dedup();
    ports
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut digits: Option<bool> = None;

    for (idx, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match digits {
            Some(previous) if previous != is_digit => {
                out.push(make_chunk(&s[start..idx], previous));
                start = idx;
            }
            _ => {}
        }
        digits = Some(is_digit);
    }
    if let Some(previous) = digits {
        out.push(make_chunk(&s[start..], previous));
    }
    out
}

fn make_chunk(text: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Number(text)
    } else {
        Chunk::Text(text)
    }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Orders interface names so `Gi1/0/2` sorts before `Gi1/0/10`
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Chunk::Number(x), Chunk::Number(y)) => compare_numbers(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(port: &str, description: &str, status: &str) -> InterfaceStatus {
        InterfaceStatus::new(port, description, status)
    }

    #[test]
    fn test_connected_ports_are_excluded() {
        let rules = EligibilityRules::default();
        assert!(!rules.is_eligible(&iface("Gi1/0/1", "", "connected")));
        assert!(!rules.is_eligible(&iface("Gi1/0/1", "", "CONNECTED")));
        assert!(rules.is_eligible(&iface("Gi1/0/1", "", "notconnect")));
        assert!(rules.is_eligible(&iface("Gi1/0/1", "", "err-disabled")));
    }

    #[test]
    fn test_tengig_ports_are_excluded_by_prefix() {
        let rules = EligibilityRules::default();
        assert!(!rules.is_eligible(&iface("Te1/1/1", "", "notconnect")));
        assert!(!rules.is_eligible(&iface("TenGigabitEthernet1/1/1", "", "notconnect")));
        assert!(rules.is_eligible(&iface("GigabitEthernet1/0/3", "", "notconnect")));
    }

    #[test]
    fn test_described_ports_are_excluded() {
        let rules = EligibilityRules::default();
        assert!(!rules.is_eligible(&iface("Gi1/0/4", "Printer lobby", "notconnect")));
        assert!(rules.is_eligible(&iface("Gi1/0/4", "   ", "notconnect")));
    }

    #[test]
    fn test_eligible_interfaces_sorted_and_unique() {
        // Arrange
        let rows = vec![
            iface("Gi1/0/10", "", "notconnect"),
            iface("Gi1/0/2", "", "notconnect"),
            iface("Gi1/0/2", "", "notconnect"),
            iface("Gi1/0/3", "uplink", "notconnect"),
            iface("Fa0/1", "", "disabled"),
        ];

        // Act
        let ports = eligible_interfaces(&rows, &EligibilityRules::default());

        // Assert
        assert_eq!(ports, vec!["Fa0/1", "Gi1/0/2", "Gi1/0/10"]);
    }

    #[test]
    fn test_custom_prefixes() {
        let rules = EligibilityRules::new(vec!["Po".to_string(), String::new()]);
        assert!(!rules.is_eligible(&iface("Po1", "", "notconnect")));
        assert!(rules.is_eligible(&iface("Te1/1/1", "", "notconnect")));
    }

    #[test]
    fn test_natural_ordering() {
        let mut names = vec!["Gi1/0/10", "Gi1/0/2", "Fa0/1", "Gi1/0/1", "Gi2/0/1", "gi1/0/3"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec!["Fa0/1", "Gi1/0/1", "Gi1/0/2", "gi1/0/3", "Gi1/0/10", "Gi2/0/1"]
        );
    }

    #[test]
    fn test_chunking() {
        assert_eq!(
            chunks("Gi1/0/10"),
            vec![
                Chunk::Text("Gi"),
                Chunk::Number("1"),
                Chunk::Text("/"),
                Chunk::Number("0"),
                Chunk::Text("/"),
                Chunk::Number("10"),
            ]
        );
        assert!(chunks("").is_empty());
    }
}
