//! API versions, dispatch levels and activation features

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Prefix of every API version name in the registry
const VERSION_PREFIX: &str = "VK_VERSION_";

/// Which function-pointer table a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchLevel {
    /// Core API version commands, loaded from the shared library
    Global,
    /// Resolved through `vkGetInstanceProcAddr`
    Instance,
    /// Resolved through `vkGetDeviceProcAddr`
    Device,
}

impl DispatchLevel {
    /// Parse the `type` attribute of an `<extension>`
    pub fn from_extension_type(s: &str) -> Option<Self> {
        match s {
            "instance" => Some(DispatchLevel::Instance),
            "device" => Some(DispatchLevel::Device),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchLevel::Global => "global",
            DispatchLevel::Instance => "instance",
            DispatchLevel::Device => "device",
        }
    }
}

impl fmt::Display for DispatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API version such as `VK_VERSION_1_1`
///
/// Ordered numerically by (major, minor), so `1_10` sorts after `1_9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    /// Version 1.0, the default for extension items without a `feature`
    pub const V1_0: ApiVersion = ApiVersion { major: 1, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse a registry version name (`VK_VERSION_<major>_<minor>`)
    pub fn parse(name: &str) -> Option<Self> {
        let (major, minor) = name.strip_prefix(VERSION_PREFIX)?.split_once('_')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }

    /// Registry name, e.g. `VK_VERSION_1_1`
    pub fn registry_name(&self) -> String {
        format!("{}{}_{}", VERSION_PREFIX, self.major, self.minor)
    }

    /// Name of the emitted version constant, e.g. `VERSION_1_1`
    pub fn const_name(&self) -> String {
        format!("VERSION_{}_{}", self.major, self.minor)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::V1_0
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}_{}", VERSION_PREFIX, self.major, self.minor)
    }
}

/// Why a command became required: dispatch level plus the minimum API
/// version it is gated on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub level: DispatchLevel,
    pub version: ApiVersion,
    /// Version or extension name that activated it
    pub origin: String,
}

impl Feature {
    /// A core API version activation
    pub fn core(version: ApiVersion) -> Self {
        Self {
            level: DispatchLevel::Global,
            origin: version.registry_name(),
            version,
        }
    }

    /// An extension activation
    pub fn extension(level: DispatchLevel, version: ApiVersion, extension: impl Into<String>) -> Self {
        Self {
            level,
            version,
            origin: extension.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_parse_version() {
        assert_eq!(ApiVersion::parse("VK_VERSION_1_1"), Some(ApiVersion::new(1, 1)));
        assert_eq!(ApiVersion::parse("VK_VERSION_1"), None);
        assert_eq!(ApiVersion::parse("VK_KHR_surface"), None);
        assert_eq!(ApiVersion::new(1, 2).registry_name(), "VK_VERSION_1_2");
        assert_eq!(ApiVersion::new(1, 2).const_name(), "VERSION_1_2");
    }

    #[test]
    fn test_versions_sort_numerically() {
        let set: BTreeSet<ApiVersion> = ["VK_VERSION_1_10", "VK_VERSION_1_2", "VK_VERSION_1_0", "VK_VERSION_1_2"]
            .iter()
            .filter_map(|v| ApiVersion::parse(v))
            .collect();

        let names: Vec<String> = set.iter().map(ApiVersion::registry_name).collect();
        assert_eq!(names, ["VK_VERSION_1_0", "VK_VERSION_1_2", "VK_VERSION_1_10"]);
    }

    #[test]
    fn test_dispatch_level() {
        assert_eq!(DispatchLevel::from_extension_type("device"), Some(DispatchLevel::Device));
        assert_eq!(DispatchLevel::from_extension_type("instance"), Some(DispatchLevel::Instance));
        assert_eq!(DispatchLevel::from_extension_type(""), None);
        assert_eq!(Feature::core(ApiVersion::V1_0).origin, "VK_VERSION_1_0");
    }
}
