//! Field-mapping helpers shared by all collections
//!
//! Hostname normalization and OS-family resolution live here so that every
//! collection produces identical join keys for the same device. The OS
//! family is resolved once per device record; interface canonicalization
//! branches on the resolved enum, never on the raw family string.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Normalize a raw hostname into the canonical join-key form
///
/// Two raw rows referring to the same device must normalize to an identical
/// string: leading/trailing whitespace and a trailing dot are stripped, and
/// the result is lowercased.
pub fn normalize_hostname(raw: &str) -> String {
    raw.trim().trim_end_matches('.').to_lowercase()
}

/// OS family of a device, as far as field mapping is concerned
///
/// Most families share the generic mapping rules; the Extreme EXOS family
/// encodes physical ports as `<switchId>:<portId>` and needs its own
/// interface-naming scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// Extreme EXOS switch-stack port naming
    Exos,
    /// Every family using the generic alias-expansion rules
    #[default]
    Generic,
}

/// Family codes the fabric API is known to report
const GENERIC_FAMILIES: &[&str] = &[
    "ios", "ios-xe", "ios-xr", "ios-rt", "nx-os", "eos", "junos", "asa", "ftd", "panos", "aireos",
    "aos", "aos-cx", "comware", "fortigate", "routeros", "timos", "vrp", "wlc-air",
];

impl OsFamily {
    /// Resolve a raw family code to its closed variant
    ///
    /// An unknown code is a canonicalization failure: silently treating it
    /// as generic would emit records with wrong interface names.
    pub fn from_code(code: &str) -> Result<Self> {
        let code = code.trim().to_lowercase();
        match code.as_str() {
            "exos" => Ok(Self::Exos),
            _ if GENERIC_FAMILIES.contains(&code.as_str()) => Ok(Self::Generic),
            _ => Err(Error::Other(format!("unmappable OS family code: {code}"))),
        }
    }
}

/// Canonical interface name for a device in the EXOS family
///
/// Physical ports arrive as `<switchId>:<portId>`; switch 1 maps to
/// `Ethernet<portId>`, any other switch to `Ethernet<switchId>/<portId>`.
/// A name not matching that pattern is a virtual port: excluded (`None`)
/// unless the row carries a primary IP address, in which case the raw name
/// is kept unchanged.
pub fn exos_interface_name(raw: &str, has_primary_ip: bool) -> Option<String> {
    if let Some((switch, port)) = parse_exos_physical(raw) {
        return Some(if switch == "1" {
            format!("Ethernet{port}")
        } else {
            format!("Ethernet{switch}/{port}")
        });
    }

    has_primary_ip.then(|| raw.to_string())
}

/// Split `<switchId>:<portId>` where both sides are non-empty digit runs
fn parse_exos_physical(raw: &str) -> Option<(&str, &str)> {
    let (switch, port) = raw.split_once(':')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    (all_digits(switch) && all_digits(port)).then_some((switch, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_lowercased_and_trimmed() {
        assert_eq!(normalize_hostname("SW1"), "sw1");
        assert_eq!(normalize_hostname(" Core-01.example.net. "), "core-01.example.net");
    }

    #[test]
    fn same_device_normalizes_identically() {
        assert_eq!(normalize_hostname("Edge-SW1"), normalize_hostname("edge-sw1."));
    }

    #[test]
    fn os_family_resolution() {
        assert_eq!(OsFamily::from_code("exos").unwrap(), OsFamily::Exos);
        assert_eq!(OsFamily::from_code("EXOS").unwrap(), OsFamily::Exos);
        assert_eq!(OsFamily::from_code("nx-os").unwrap(), OsFamily::Generic);
        assert_eq!(OsFamily::from_code("junos").unwrap(), OsFamily::Generic);
        assert!(OsFamily::from_code("frobnix").is_err());
    }

    #[test]
    fn exos_switch_one_drops_switch_id() {
        assert_eq!(exos_interface_name("1:12", false), Some("Ethernet12".into()));
    }

    #[test]
    fn exos_other_switches_keep_switch_id() {
        assert_eq!(exos_interface_name("2:12", false), Some("Ethernet2/12".into()));
        assert_eq!(exos_interface_name("10:1", true), Some("Ethernet10/1".into()));
    }

    #[test]
    fn exos_virtual_port_excluded_without_primary_ip() {
        assert_eq!(exos_interface_name("Mgmt", false), None);
        assert_eq!(exos_interface_name("1:x", false), None);
    }

    #[test]
    fn exos_virtual_port_kept_raw_with_primary_ip() {
        assert_eq!(exos_interface_name("Mgmt", true), Some("Mgmt".into()));
    }
}
