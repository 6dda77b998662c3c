//! Registry ingestion
//!
//! The XML document is read into a [`dom::Element`] tree and converted once
//! into a typed [`Registry`]. Everything downstream works on the typed form.
//!
//! Structural problems (a command without `<proto>`, a member without
//! `<name>`) are [`RegistryError`]s. Types the generator cannot represent
//! are collected in [`Registry::unsupported`] and reported later.

mod builtin;
pub mod dom;
mod require;

#[cfg(test)]
pub(crate) mod fixture;

pub use require::{EnumRequire, EnumSpec, Extension, FeatureBlock, RequireItem};

use crate::diagnostics::RegistryError;
use crate::ir::{
    parse_bitpos, parse_declaration, parse_value, Category, EnumMember, Enumeration, Payload,
    Prototype, Symbol,
};
use dom::Element;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Name of the `<enums>` block holding free-standing constants
pub const API_CONSTANTS: &str = "API Constants";

/// A `<type>` entry: a definition or an alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeEntry {
    Symbol(Symbol),
    Alias { name: String, target: String },
}

impl TypeEntry {
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Symbol(s) => &s.name,
            TypeEntry::Alias { name, .. } => name,
        }
    }
}

/// A `<command>` entry: a prototype or an alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEntry {
    Command(Prototype),
    Alias { name: String, target: String },
}

/// Members of one `<enums>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumBlock {
    pub name: String,
    pub members: Vec<EnumMember>,
}

/// The registry, typed
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Registry types in document order, then the built-in symbols
    pub types: Vec<TypeEntry>,
    pub enum_blocks: Vec<EnumBlock>,
    pub commands: Vec<CommandEntry>,
    pub features: Vec<FeatureBlock>,
    pub extensions: Vec<Extension>,
    /// Types recognised but skipped, with the reason
    pub unsupported: Vec<(String, String)>,
}

impl Registry {
    /// Read and ingest a registry file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = File::open(path.as_ref())?;
        Self::parse(BufReader::new(file))
    }

    /// Ingest a registry document
    pub fn parse<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let root = dom::parse_document(reader)?;
        Self::from_element(&root)
    }

    /// Ingest an already parsed document
    pub fn from_element(root: &Element) -> Result<Self, RegistryError> {
        let mut registry = Registry::default();

        for types in root.children_named("types") {
            for ty in types.children_named("type") {
                registry.ingest_type(ty)?;
            }
        }
        registry.types.extend(builtin::function_pointers());
        registry.types.extend(builtin::platform_types());

        for block in root.children_named("enums") {
            registry.enum_blocks.push(parse_enum_block(block)?);
        }

        for commands in root.children_named("commands") {
            for command in commands.children_named("command") {
                registry.commands.push(parse_command(command)?);
            }
        }

        for feature in root.children_named("feature") {
            registry.features.push(FeatureBlock::parse(feature)?);
        }

        for extensions in root.children_named("extensions") {
            for extension in extensions.children_named("extension") {
                registry.extensions.push(Extension::parse(extension)?);
            }
        }

        tracing::debug!(
            types = registry.types.len(),
            commands = registry.commands.len(),
            features = registry.features.len(),
            extensions = registry.extensions.len(),
            "registry ingested"
        );
        Ok(registry)
    }

    /// The `<feature>` block with this name
    pub fn feature(&self, name: &str) -> Option<&FeatureBlock> {
        self.features.iter().find(|f| f.name == name)
    }

    /// The `<enums>` block with this name
    pub fn enum_block(&self, name: &str) -> Option<&EnumBlock> {
        self.enum_blocks.iter().find(|b| b.name == name)
    }

    fn ingest_type(&mut self, ty: &Element) -> Result<(), RegistryError> {
        let Some(category) = ty.attr("category").and_then(Category::from_registry) else {
            return Ok(());
        };

        if let Some(target) = ty.attr("alias") {
            let name = ty.required_attr("name")?;
            self.types.push(TypeEntry::Alias {
                name: name.to_string(),
                target: target.to_string(),
            });
            return Ok(());
        }

        let symbol = match category {
            Category::BaseType => {
                let name = ty.required_child_text("name")?;
                let Some(underlying) = ty.child_text("type") else {
                    self.unsupported
                        .push((name, "basetype without an underlying type".to_string()));
                    return Ok(());
                };
                Symbol::new(
                    name,
                    category,
                    Payload::BaseType {
                        underlying: underlying.clone(),
                    },
                )
                .requires(underlying)
            }
            Category::Handle => {
                let name = ty.required_child_text("name")?;
                let parent = ty
                    .attr("parent")
                    .and_then(|p| p.split(',').next())
                    .map(str::to_string);
                Symbol::new(name, category, Payload::Handle { parent })
            }
            Category::Bitmask => {
                let name = ty.required_child_text("name")?;
                let int_type = ty.required_child_text("type").map_err(|e| e.within(&name))?;
                let bits = ty.attr("requires").or_else(|| ty.attr("bitvalues"));
                Symbol::new(
                    name,
                    category,
                    Payload::Enumeration(Enumeration::new(int_type.clone())),
                )
                .requires(int_type)
                .with_requires(bits)
            }
            Category::Enum => {
                let name = ty.required_attr("name")?;
                Symbol::new(
                    name,
                    category,
                    Payload::Enumeration(Enumeration::new("uint32_t")),
                )
            }
            Category::Struct | Category::Union => {
                let name = ty.required_attr("name")?;
                let members = ty
                    .children_named("member")
                    .map(|m| parse_declaration(m).map_err(|e| e.within(name)))
                    .collect::<Result<Vec<_>, _>>()?;
                let requires: Vec<String> = members.iter().map(|m| m.ty.clone()).collect();
                Symbol::new(
                    name,
                    category,
                    Payload::Members {
                        members,
                        derive_debug: false,
                    },
                )
                .with_requires(requires)
            }
            Category::FuncPointer | Category::External => return Ok(()),
        };

        self.types.push(TypeEntry::Symbol(symbol));
        Ok(())
    }
}

/// Parse the members of an `<enums>` block; alias enumerants are skipped
fn parse_enum_block(block: &Element) -> Result<EnumBlock, RegistryError> {
    let name = block.required_attr("name")?.to_string();
    let mut members = Vec::new();

    for e in block.children_named("enum") {
        let member_name = e.required_attr("name").map_err(|err| err.within(&name))?;
        if let Some(value) = e.attr("value") {
            members.push(EnumMember::new(member_name, parse_value(value)));
        } else if let Some(bitpos) = e.attr("bitpos") {
            members.push(EnumMember::new(member_name, parse_bitpos(bitpos)?));
        }
    }

    Ok(EnumBlock { name, members })
}

fn parse_command(command: &Element) -> Result<CommandEntry, RegistryError> {
    if let Some(target) = command.attr("alias") {
        return Ok(CommandEntry::Alias {
            name: command.required_attr("name")?.to_string(),
            target: target.to_string(),
        });
    }

    let proto = command
        .child("proto")
        .ok_or_else(|| RegistryError::missing_element("command", "proto"))?;
    let name = proto.required_child_text("name")?;
    let return_type = proto
        .required_child_text("type")
        .map_err(|e| e.within(&name))?;

    let mut prototype = Prototype::new(name.clone(), return_type);
    for param in command.children_named("param") {
        prototype = prototype.param(parse_declaration(param).map_err(|e| e.within(&name))?);
    }
    Ok(CommandEntry::Command(prototype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Mutability, ScalarType, Shape};

    fn registry() -> Registry {
        Registry::parse(fixture::REGISTRY.as_bytes()).unwrap()
    }

    fn symbol<'a>(registry: &'a Registry, name: &str) -> &'a Symbol {
        registry
            .types
            .iter()
            .find_map(|t| match t {
                TypeEntry::Symbol(s) if s.name == name => Some(s),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_types_in_document_order_then_builtins() {
        let registry = registry();
        let names: Vec<&str> = registry.types.iter().map(TypeEntry::name).collect();

        let flags = names.iter().position(|n| *n == "VkFlags").unwrap();
        let instance = names.iter().position(|n| *n == "VkInstance").unwrap();
        let builtin = names.iter().position(|n| *n == "PFN_vkVoidFunction").unwrap();
        assert!(flags < instance);
        assert!(instance < builtin);
        assert_eq!(names.last(), Some(&"SECURITY_ATTRIBUTES"));

        // define, include and funcpointer entries are not ingested as symbols
        assert_eq!(names.iter().filter(|n| **n == "PFN_vkVoidFunction").count(), 1);
        assert!(!names.contains(&"vk_platform"));
    }

    #[test]
    fn test_type_categories() {
        let registry = registry();

        let device = symbol(&registry, "VkDevice");
        assert_eq!(device.payload, Payload::Handle { parent: Some("VkPhysicalDevice".to_string()) });

        let transform = symbol(&registry, "VkSurfaceTransformFlagsKHR");
        assert_eq!(transform.category, Category::Bitmask);
        assert_eq!(transform.requires, ["VkFlags", "VkSurfaceTransformFlagBitsKHR"]);

        let info = symbol(&registry, "VkInstanceCreateInfo");
        assert_eq!(info.requires, ["VkStructureType", "VkFlags", "VkApplicationInfo"]);
        let names = info.members().iter().find(|m| m.name == "ppEnabledExtensionNames").unwrap();
        assert_eq!(names.shape, Shape::Pointer(vec![Mutability::Const, Mutability::Const]));

        assert!(registry.types.iter().any(|t| matches!(
            t,
            TypeEntry::Alias { name, target } if name == "VkCommandPoolTrimFlagsKHR" && target == "VkCommandPoolTrimFlags"
        )));
    }

    #[test]
    fn test_opaque_basetype_is_unsupported() {
        let registry = registry();
        assert_eq!(registry.unsupported.len(), 1);
        assert_eq!(registry.unsupported[0].0, "MTLDevice_id");
        assert!(!registry.types.iter().any(|t| t.name() == "MTLDevice_id"));
    }

    #[test]
    fn test_enum_blocks() {
        let registry = registry();

        let constants = registry.enum_block(API_CONSTANTS).unwrap();
        let whole = constants.members.iter().find(|m| m.name == "VK_WHOLE_SIZE").unwrap();
        assert_eq!(whole.value.scalar, ScalarType::U64);
        assert_eq!(whole.value.text, "!0u64");
        assert!(!constants.members.iter().any(|m| m.name == "VK_QUEUE_FAMILY_EXTERNAL_KHR"));

        let bits = registry.enum_block("VkSurfaceTransformFlagBitsKHR").unwrap();
        assert_eq!(bits.members[1].value.text, "1 << 1");
    }

    #[test]
    fn test_commands() {
        let registry = registry();

        let create = registry
            .commands
            .iter()
            .find_map(|c| match c {
                CommandEntry::Command(p) if p.name == "vkCreateInstance" => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(create.return_type, "VkResult");
        assert_eq!(create.params.len(), 3);
        assert_eq!(create.rust_name(), "CreateInstance");

        assert!(registry.commands.iter().any(|c| matches!(
            c,
            CommandEntry::Alias { name, target } if name == "vkTrimCommandPoolKHR" && target == "vkTrimCommandPool"
        )));
    }

    #[test]
    fn test_command_without_proto_is_fatal() {
        let xml = "<registry><commands><command><param><type>int</type> <name>x</name></param></command></commands></registry>";
        let err = Registry::parse(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, RegistryError::MissingElement { ref child, .. } if child == "proto"));
    }

    #[test]
    fn test_member_without_name_is_fatal() {
        let xml = r#"<registry><types><type category="struct" name="VkBroken"><member><type>uint32_t</type></member></type></types></registry>"#;
        let err = Registry::parse(xml.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "<member> without <name> child (in VkBroken)");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::from_path(dir.path().join("vk.xml")).unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
