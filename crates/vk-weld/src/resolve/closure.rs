//! Serializable summary of a resolution

use crate::diagnostics::Diagnostic;
use crate::ir::{Category, DispatchLevel};
use crate::resolve::Resolution;
use serde::{Deserialize, Serialize};

/// Category order used when emitting and reporting types
pub const CATEGORY_ORDER: &[Category] = &[
    Category::BaseType,
    Category::Handle,
    Category::FuncPointer,
    Category::Enum,
    Category::Bitmask,
    Category::Struct,
    Category::Union,
    Category::External,
];

/// Used types of one category, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGroup {
    pub category: Category,
    pub names: Vec<String>,
}

/// An activated command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureCommand {
    pub name: String,
    pub level: DispatchLevel,
    /// Minimum version, e.g. `VK_VERSION_1_1`
    pub version: String,
    /// Version or extension that activated it
    pub origin: String,
}

/// The dependency closure of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    /// Versions gating at least one command, ascending
    pub versions: Vec<String>,
    /// Only non-empty groups appear
    pub types: Vec<TypeGroup>,
    /// Activation order
    pub commands: Vec<ClosureCommand>,
    pub extension_names: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Closure {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let types = CATEGORY_ORDER
            .iter()
            .map(|category| TypeGroup {
                category: *category,
                names: resolution
                    .symbols
                    .iterate(std::slice::from_ref(category), true)
                    .map(|s| s.name.clone())
                    .collect(),
            })
            .filter(|group| !group.names.is_empty())
            .collect();

        let commands = resolution
            .commands
            .activated()
            .filter_map(|command| {
                let feature = command.feature()?;
                Some(ClosureCommand {
                    name: command.name().to_string(),
                    level: feature.level,
                    version: feature.version.registry_name(),
                    origin: feature.origin.clone(),
                })
            })
            .collect();

        Self {
            versions: resolution
                .commands
                .versions()
                .iter()
                .map(|v| v.registry_name())
                .collect(),
            types,
            commands,
            extension_names: resolution
                .extension_names
                .members
                .iter()
                .map(|m| m.name.clone())
                .collect(),
            diagnostics: resolution.diagnostics.diagnostics().to_vec(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Names of the used types of one category
    pub fn types_of(&self, category: Category) -> &[String] {
        self.types
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.names.as_slice())
            .unwrap_or(&[])
    }
}
