//! Requirement resolution
//!
//! A [`Resolution`] owns the symbol table, command table and constant
//! groups of one generation run. Activating versions and extensions marks
//! what they require as used and records the order commands were first
//! activated in. Nothing here produces text; see [`crate::codegen`].
//!
//! Versions are always processed in ascending order, then extensions in
//! registry order, so the result does not depend on how the versions were
//! listed.

mod closure;

pub use closure::{Closure, ClosureCommand, TypeGroup};

use crate::diagnostics::{AnomalyCode, Diagnostic, DiagnosticsCollector, GeneratorError, RegistryError};
use crate::ir::{
    bit_value, parse_extension_offset, parse_value, string_member, ApiVersion, CommandTable,
    EnumMember, Enumeration, Feature, SymbolTable,
};
use crate::registry::{
    CommandEntry, EnumRequire, EnumSpec, Extension, Registry, RequireItem, TypeEntry, API_CONSTANTS,
};

/// Versions activated when none are configured
pub const DEFAULT_VERSIONS: &[&str] = &["VK_VERSION_1_0", "VK_VERSION_1_1"];

/// Registry type requirements that only concern the C header
pub const IGNORED_TYPES: &[&str] = &[
    "vk_platform",
    "VK_API_VERSION",
    "VK_API_VERSION_1_0",
    "VK_API_VERSION_1_1",
    "VK_VERSION_MAJOR",
    "VK_VERSION_MINOR",
    "VK_VERSION_PATCH",
    "VK_HEADER_VERSION",
    "VK_NULL_HANDLE",
];

/// Name of the result enumeration the result section is generated from
pub const RESULT_TYPE: &str = "VkResult";

/// What to activate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Version names, e.g. `VK_VERSION_1_1`
    pub versions: Vec<String>,
    /// Extensions to skip even when they are enabled and non-empty
    pub exclude_extensions: Vec<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            versions: DEFAULT_VERSIONS.iter().map(|v| v.to_string()).collect(),
            exclude_extensions: Vec::new(),
        }
    }
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the activated versions
    pub fn versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions = versions.into_iter().map(Into::into).collect();
        self
    }

    /// Add extensions to skip
    pub fn exclude<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_extensions
            .extend(extensions.into_iter().map(Into::into));
        self
    }

    pub fn excludes(&self, extension: &str) -> bool {
        self.exclude_extensions.iter().any(|e| e == extension)
    }

    /// Parsed versions, ascending and deduplicated
    pub fn parsed_versions(&self) -> Result<Vec<ApiVersion>, GeneratorError> {
        let mut versions = self
            .versions
            .iter()
            .map(|v| ApiVersion::parse(v).ok_or_else(|| GeneratorError::InvalidVersion(v.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        versions.sort();
        versions.dedup();
        Ok(versions)
    }
}

/// Mutable state of one generation run
#[derive(Debug)]
pub struct Resolution {
    pub symbols: SymbolTable,
    pub commands: CommandTable,
    /// The free-standing `API Constants` group
    pub api_constants: Enumeration,
    /// `*_EXTENSION_NAME` strings of the activated extensions
    pub extension_names: Enumeration,
    pub diagnostics: DiagnosticsCollector,
}

impl Resolution {
    /// Build the tables from the registry; nothing is marked used yet
    pub fn from_registry(registry: &Registry) -> Self {
        let mut diagnostics = DiagnosticsCollector::new();
        for (name, reason) in &registry.unsupported {
            diagnostics.add(Diagnostic::warning(
                AnomalyCode::UnsupportedType,
                name,
                format!("unsupported type {}: {}", name, reason),
            ));
        }

        let mut symbols = SymbolTable::new();
        for entry in &registry.types {
            match entry {
                TypeEntry::Symbol(symbol) => {
                    symbols.register(symbol.clone());
                }
                TypeEntry::Alias { name, target } => {
                    symbols.register_alias(name, target);
                }
            }
        }

        let mut api_constants = Enumeration::constants();
        for block in &registry.enum_blocks {
            if block.name == API_CONSTANTS {
                api_constants.members = block.members.clone();
                continue;
            }
            if let Some(enumeration) = symbols
                .get_mut(&block.name)
                .and_then(|s| s.enumeration_mut())
            {
                enumeration.members = block.members.clone();
            }
        }
        symbols.infer_debug_derives();

        let mut commands = CommandTable::new();
        for entry in &registry.commands {
            match entry {
                CommandEntry::Command(prototype) => {
                    commands.register(prototype.clone());
                }
                CommandEntry::Alias { name, target } => {
                    commands.register_alias(name, target);
                }
            }
        }

        tracing::debug!(
            symbols = symbols.len(),
            commands = commands.len(),
            "tables built"
        );

        Self {
            symbols,
            commands,
            api_constants,
            extension_names: Enumeration::constants(),
            diagnostics,
        }
    }

    /// Build the tables and activate everything `policy` selects
    pub fn resolve(registry: &Registry, policy: &Policy) -> Result<Self, GeneratorError> {
        let versions = policy.parsed_versions()?;
        let mut resolution = Self::from_registry(registry);

        for version in &versions {
            resolution.require_feature(registry, version)?;
        }

        for extension in &registry.extensions {
            if extension.is_empty() {
                tracing::trace!(extension = %extension.name, "skipping empty or disabled extension");
                continue;
            }
            if policy.excludes(&extension.name) {
                tracing::debug!(extension = %extension.name, "skipping excluded extension");
                continue;
            }
            resolution.require_extension(extension)?;
        }

        if resolution.symbols.get(RESULT_TYPE).is_none() {
            resolution.diagnostics.add(Diagnostic::warning(
                AnomalyCode::MissingResultType,
                RESULT_TYPE,
                format!("{} not declared, no result section generated", RESULT_TYPE),
            ));
        }

        tracing::info!(
            commands = resolution.commands.activation_order().len(),
            types = resolution.symbols.used_count(),
            anomalies = resolution.diagnostics.len(),
            "resolution complete"
        );
        Ok(resolution)
    }

    /// Activate everything one API version requires
    pub fn require_feature(&mut self, registry: &Registry, version: &ApiVersion) -> Result<(), RegistryError> {
        let name = version.registry_name();
        let Some(block) = registry.feature(&name) else {
            self.diagnostics.add(Diagnostic::warning(
                AnomalyCode::FeatureNotFound,
                &name,
                format!("feature not found: {}", name),
            ));
            return Ok(());
        };

        tracing::debug!(feature = %block.name, items = block.requires.len(), "require feature");
        let feature = Feature::core(version.clone());
        for item in &block.requires {
            self.require_item(item, &feature, None)?;
        }
        Ok(())
    }

    /// Activate everything one extension requires
    ///
    /// Items default to version 1.0; an item's own `feature` attribute
    /// overrides that for the item alone.
    pub fn require_extension(&mut self, extension: &Extension) -> Result<(), RegistryError> {
        let Some(level) = extension.level else {
            return Err(RegistryError::missing_attribute("extension", "type").within(&extension.name));
        };

        tracing::debug!(extension = %extension.name, level = %level, "require extension");
        for item in &extension.requires {
            let version = match item.feature() {
                None => ApiVersion::V1_0,
                Some(name) => ApiVersion::parse(name).unwrap_or_else(|| {
                    self.diagnostics.add(Diagnostic::warning(
                        AnomalyCode::FeatureNotFound,
                        name,
                        format!("feature not found: {} (required by {})", name, item.name()),
                    ));
                    ApiVersion::V1_0
                }),
            };
            let feature = Feature::extension(level, version, &extension.name);
            self.require_item(item, &feature, extension.number)?;
        }
        Ok(())
    }

    fn require_item(
        &mut self,
        item: &RequireItem,
        feature: &Feature,
        extension_number: Option<u32>,
    ) -> Result<(), RegistryError> {
        match item {
            RequireItem::Type { name, .. } => {
                if !IGNORED_TYPES.contains(&name.as_str()) {
                    self.symbols.require(name, &mut self.diagnostics);
                }
            }
            RequireItem::Enum(e) if e.is_extension_name() => {
                if let Some(EnumSpec::Value(value)) = &e.spec {
                    self.extension_names.extend(string_member(&e.name, value));
                }
            }
            RequireItem::Enum(e) => self.extend_enum(e, extension_number)?,
            RequireItem::Command { name, .. } => {
                let requires = self
                    .commands
                    .require(name, feature.clone(), &mut self.diagnostics);
                for ty in &requires {
                    self.symbols.require(ty, &mut self.diagnostics);
                }
            }
        }
        Ok(())
    }

    /// Append an extension-defined member to the enumeration it extends
    fn extend_enum(&mut self, e: &EnumRequire, extension_number: Option<u32>) -> Result<(), RegistryError> {
        let (Some(extends), Some(spec)) = (&e.extends, &e.spec) else {
            return Ok(());
        };
        let target = self.symbols.resolve(extends).to_string();
        let Some(enumeration) = self
            .symbols
            .get_mut(&target)
            .and_then(|s| s.enumeration_mut())
        else {
            return Ok(());
        };
        if enumeration.contains(&e.name) {
            return Ok(());
        }

        let value = match spec {
            EnumSpec::Value(raw) => parse_value(raw),
            EnumSpec::Bitpos(bit) => bit_value(*bit),
            EnumSpec::Offset {
                offset,
                extnumber,
                direction,
            } => {
                let number = extnumber.or(extension_number).ok_or_else(|| {
                    RegistryError::missing_attribute("enum", "extnumber").within(&e.name)
                })?;
                parse_value(&parse_extension_offset(number, *offset, *direction).to_string())
            }
        };
        enumeration.extend(EnumMember::new(&e.name, value));
        Ok(())
    }

    /// The ordered outcome, for reporting
    pub fn closure(&self) -> Closure {
        Closure::from_resolution(self)
    }
}
