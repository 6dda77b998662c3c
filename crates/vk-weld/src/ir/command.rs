//! Command table: entry points, their activation feature and order

use crate::diagnostics::DiagnosticsCollector;
use crate::ir::{is_primitive, ApiVersion, Declaration, DispatchLevel, Feature};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Prefix stripped from command names on emission
const COMMAND_PREFIX: &str = "vk";

/// Command signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<Declaration>,
    /// Registry name of the return type (`void` for none)
    pub return_type: String,
}

impl Prototype {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: return_type.into(),
        }
    }

    /// Add a parameter
    pub fn param(mut self, param: Declaration) -> Self {
        self.params.push(param);
        self
    }

    /// Name without the `vk` prefix
    pub fn rust_name(&self) -> &str {
        self.name.strip_prefix(COMMAND_PREFIX).unwrap_or(&self.name)
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }
}

/// When and why a command was activated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub feature: Feature,
    /// Position in the global activation order
    pub sequence: usize,
}

/// A registry command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub prototype: Prototype,
    /// Non-primitive return and parameter types, first-seen order
    pub requires: Vec<String>,
    /// Set at most once by [`CommandTable::require`]
    pub activation: Option<Activation>,
}

impl Command {
    pub fn new(prototype: Prototype) -> Self {
        let mut requires: Vec<String> = Vec::new();
        let types = std::iter::once(&prototype.return_type)
            .chain(prototype.params.iter().map(|p| &p.ty));
        for ty in types {
            if !is_primitive(ty) && !requires.contains(ty) {
                requires.push(ty.clone());
            }
        }
        Self {
            prototype,
            requires,
            activation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.prototype.name
    }

    pub fn is_used(&self) -> bool {
        self.activation.is_some()
    }

    pub fn feature(&self) -> Option<&Feature> {
        self.activation.as_ref().map(|a| &a.feature)
    }
}

/// Table of registry commands keyed by name
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: IndexMap<String, Command>,
    aliases: IndexMap<String, String>,
    order: Vec<String>,
    versions: BTreeSet<ApiVersion>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command; an existing command of the same name is kept
    pub fn register(&mut self, prototype: Prototype) -> bool {
        if self.commands.contains_key(&prototype.name) {
            return false;
        }
        self.commands
            .insert(prototype.name.clone(), Command::new(prototype));
        true
    }

    /// Record `name` as an alias of the command `target`
    pub fn register_alias(&mut self, name: impl Into<String>, target: impl Into<String>) -> bool {
        let name = name.into();
        if self.aliases.contains_key(&name) {
            return false;
        }
        self.aliases.insert(name, target.into());
        true
    }

    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Activate a command under `feature`
    ///
    /// Returns the type names the command depends on the first time it is
    /// activated, and nothing on later calls or for unknown names.
    pub fn require(
        &mut self,
        name: &str,
        feature: Feature,
        diagnostics: &mut DiagnosticsCollector,
    ) -> Vec<String> {
        let name = self.resolve(name).to_string();
        let sequence = self.order.len();

        let Some(command) = self.commands.get_mut(&name) else {
            diagnostics.command_not_found(&name);
            return Vec::new();
        };
        if command.is_used() {
            return Vec::new();
        }

        tracing::trace!(command = %name, feature = %feature.origin, sequence, "activate");
        self.versions.insert(feature.version.clone());
        command.activation = Some(Activation { feature, sequence });
        self.order.push(name);
        command.requires.clone()
    }

    /// Activated commands in activation order
    pub fn activated(&self) -> impl Iterator<Item = &Command> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    /// Activated commands of one dispatch level, in activation order
    pub fn activated_at(&self, level: DispatchLevel) -> impl Iterator<Item = &Command> {
        self.activated()
            .filter(move |c| c.feature().map_or(false, |f| f.level == level))
    }

    /// Names in activation order
    pub fn activation_order(&self) -> &[String] {
        &self.order
    }

    /// Versions that gate at least one activated command, ascending
    pub fn versions(&self) -> &BTreeSet<ApiVersion> {
        &self.versions
    }

    /// Highest known version
    pub fn latest_version(&self) -> Option<&ApiVersion> {
        self.versions.iter().next_back()
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(self.resolve(name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
