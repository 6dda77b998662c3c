//! `<feature>` and `<extension>` blocks and their requirement items

use crate::diagnostics::RegistryError;
use crate::ir::{ApiVersion, Direction, DispatchLevel, MAX_BITPOS};
use crate::registry::dom::Element;

/// Suffix of the string constant naming an extension
pub const EXTENSION_NAME_SUFFIX: &str = "EXTENSION_NAME";

/// Suffix of the constant holding an extension's revision
pub const SPEC_VERSION_SUFFIX: &str = "SPEC_VERSION";

/// How an enum requirement spells its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumSpec {
    /// Literal `value` attribute
    Value(String),
    /// `bitpos` attribute
    Bitpos(u32),
    /// `offset` relative to an extension number
    Offset {
        offset: u32,
        /// Overrides the enclosing extension's number
        extnumber: Option<u32>,
        direction: Direction,
    },
}

/// An `<enum>` inside a `<require>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRequire {
    pub name: String,
    /// Enumeration this member is appended to
    pub extends: Option<String>,
    /// `None` for references and aliases
    pub spec: Option<EnumSpec>,
    pub feature: Option<String>,
}

impl EnumRequire {
    /// Whether this names the extension's name string
    pub fn is_extension_name(&self) -> bool {
        self.name.ends_with(EXTENSION_NAME_SUFFIX)
    }

    /// Whether this only carries extension metadata (revision or name)
    pub fn is_metadata(&self) -> bool {
        self.is_extension_name() || self.name.ends_with(SPEC_VERSION_SUFFIX)
    }
}

/// One child of a `<require>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequireItem {
    Type { name: String, feature: Option<String> },
    Enum(EnumRequire),
    Command { name: String, feature: Option<String> },
}

impl RequireItem {
    pub fn name(&self) -> &str {
        match self {
            RequireItem::Type { name, .. } | RequireItem::Command { name, .. } => name,
            RequireItem::Enum(e) => &e.name,
        }
    }

    /// Per-item minimum version, overriding the enclosing default
    pub fn feature(&self) -> Option<&str> {
        match self {
            RequireItem::Type { feature, .. } | RequireItem::Command { feature, .. } => {
                feature.as_deref()
            }
            RequireItem::Enum(e) => e.feature.as_deref(),
        }
    }

    fn parse(element: &Element) -> Result<Option<Self>, RegistryError> {
        let item = match element.name.as_str() {
            "type" => RequireItem::Type {
                name: element.required_attr("name")?.to_string(),
                feature: element.attr("feature").map(str::to_string),
            },
            "command" => RequireItem::Command {
                name: element.required_attr("name")?.to_string(),
                feature: element.attr("feature").map(str::to_string),
            },
            "enum" => RequireItem::Enum(parse_enum_require(element)?),
            _ => return Ok(None),
        };
        Ok(Some(item))
    }
}

fn parse_enum_require(element: &Element) -> Result<EnumRequire, RegistryError> {
    let name = element.required_attr("name")?.to_string();

    let spec = if let Some(value) = element.attr("value") {
        Some(EnumSpec::Value(value.to_string()))
    } else if let Some(bit) = parse_number(element, "bitpos", &name)? {
        if bit > MAX_BITPOS {
            return Err(RegistryError::InvalidNumber {
                attribute: "bitpos".to_string(),
                value: bit.to_string(),
                context: name,
            });
        }
        Some(EnumSpec::Bitpos(bit))
    } else if element.attr("offset").is_some() {
        Some(EnumSpec::Offset {
            offset: parse_number(element, "offset", &name)?.unwrap_or_default(),
            extnumber: parse_number(element, "extnumber", &name)?,
            direction: Direction::from_attr(element.attr("dir")),
        })
    } else {
        None
    };

    Ok(EnumRequire {
        extends: element.attr("extends").map(str::to_string),
        feature: element.attr("feature").map(str::to_string),
        name,
        spec,
    })
}

/// Parse an optional numeric attribute
fn parse_number(element: &Element, attribute: &str, context: &str) -> Result<Option<u32>, RegistryError> {
    element
        .attr(attribute)
        .map(|raw| {
            raw.trim().parse().map_err(|_| RegistryError::InvalidNumber {
                attribute: attribute.to_string(),
                value: raw.to_string(),
                context: context.to_string(),
            })
        })
        .transpose()
}

/// Items of every `<require>` child, in document order
fn parse_requires(element: &Element) -> Result<Vec<RequireItem>, RegistryError> {
    let mut items = Vec::new();
    for require in element.children_named("require") {
        for child in require.elements() {
            if let Some(item) = RequireItem::parse(child)? {
                items.push(item);
            }
        }
    }
    Ok(items)
}

/// A `<feature>` block: what one API version requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBlock {
    pub name: String,
    /// `None` when the name is not of the `VK_VERSION_X_Y` form
    pub version: Option<ApiVersion>,
    pub requires: Vec<RequireItem>,
}

impl FeatureBlock {
    pub(crate) fn parse(element: &Element) -> Result<Self, RegistryError> {
        let name = element.required_attr("name")?.to_string();
        Ok(Self {
            version: ApiVersion::parse(&name),
            requires: parse_requires(element).map_err(|e| e.within(&name))?,
            name,
        })
    }
}

/// An `<extension>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    /// Base for offset-valued enumerants
    pub number: Option<u32>,
    /// `None` when the `type` attribute is absent (disabled placeholders)
    pub level: Option<DispatchLevel>,
    pub supported: Option<String>,
    pub requires: Vec<RequireItem>,
}

impl Extension {
    pub(crate) fn parse(element: &Element) -> Result<Self, RegistryError> {
        let name = element.required_attr("name")?.to_string();
        let supported = element.attr("supported").map(str::to_string);
        let level = element.attr("type").and_then(DispatchLevel::from_extension_type);

        let extension = Self {
            number: parse_number(element, "number", &name)?,
            level,
            supported,
            requires: parse_requires(element).map_err(|e| e.within(&name))?,
            name,
        };
        if extension.level.is_none() && !extension.is_disabled() {
            return Err(RegistryError::missing_attribute("extension", "type").within(&extension.name));
        }
        Ok(extension)
    }

    /// `supported="disabled"`
    pub fn is_disabled(&self) -> bool {
        self.supported.as_deref() == Some("disabled")
    }

    /// Disabled, or contributing nothing but its revision and name string
    pub fn is_empty(&self) -> bool {
        if self.is_disabled() {
            return true;
        }
        self.requires.iter().all(|item| match item {
            RequireItem::Enum(e) => e.is_metadata(),
            RequireItem::Type { .. } | RequireItem::Command { .. } => false,
        })
    }
}
