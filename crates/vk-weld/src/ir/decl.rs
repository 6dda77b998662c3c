//! Declaration parsing for struct members, command parameters and prototypes
//!
//! The registry spells declarations as C fragments split over child nodes:
//!
//! ```text
//! <member>const <type>char</type>* const* <name>ppEnabledLayerNames</name></member>
//! <member><type>char</type> <name>deviceName</name>[<enum>VK_MAX_PHYSICAL_DEVICE_NAME_SIZE</enum>]</member>
//! ```
//!
//! [`parse_declaration`] removes the name and the type from the full text
//! and classifies what is left (`*`, `const`, `[...]`) as a [`Shape`].

use crate::diagnostics::RegistryError;
use crate::ir::SymbolTable;
use crate::registry::dom::Element;
use serde::{Deserialize, Serialize};

/// Parameter names that collide with Rust keywords, and their replacement
const RESERVED_NAMES: &[(&str, &str)] = &[("type", "typ")];

/// Mutability of one pointer level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutability {
    Const,
    Mut,
}

/// Length of a fixed size array
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayLength {
    Literal(usize),
    /// Named API constant, e.g. `VK_UUID_SIZE`
    Symbolic(String),
}

/// How the declared type is wrapped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Value,
    /// One entry per pointer level, outermost last
    Pointer(Vec<Mutability>),
    /// One entry per dimension, outermost first
    Array(Vec<ArrayLength>),
}

/// A normalized declaration: `name: shape<ty>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub ty: String,
    pub shape: Shape,
}

impl Declaration {
    /// Create a plain value declaration
    pub fn value(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            shape: Shape::Value,
        }
    }

    /// Parse the raw declaration text of a `<member>` or `<param>`
    pub fn parse(name: &str, ty: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
            shape: parse_shape(text, name, ty),
        }
    }

    /// Substitute the emission-ready type name and rename reserved names
    ///
    /// The parsed declaration is left untouched.
    pub fn resolve(&self, symbols: &SymbolTable) -> Declaration {
        Declaration {
            name: rust_param_name(&self.name).to_string(),
            ty: symbols.spelling(&self.ty),
            shape: self.shape.clone(),
        }
    }

    /// Render the type part, e.g. `*const *mut c_void` or `[u8; UUID_SIZE as usize]`
    ///
    /// `float matrix[3][4]` renders as `[[f32; 4]; 3]`.
    pub fn render_type(&self) -> String {
        match &self.shape {
            Shape::Value => self.ty.clone(),
            Shape::Pointer(levels) => {
                let mut out = String::new();
                for level in levels {
                    out.push_str(match level {
                        Mutability::Const => "*const ",
                        Mutability::Mut => "*mut ",
                    });
                }
                out.push_str(&self.ty);
                out
            }
            Shape::Array(dimensions) => {
                dimensions
                    .iter()
                    .rev()
                    .fold(self.ty.clone(), |inner, length| match length {
                        ArrayLength::Literal(n) => format!("[{}; {}]", inner, n),
                        ArrayLength::Symbolic(constant) => {
                            let constant = constant.strip_prefix("VK_").unwrap_or(constant);
                            format!("[{}; {} as usize]", inner, constant)
                        }
                    })
            }
        }
    }

    /// Render as `name: type`
    pub fn render(&self) -> String {
        format!("{}: {}", self.name, self.render_type())
    }

    /// Whether this is a fixed size array
    pub fn is_array(&self) -> bool {
        matches!(self.shape, Shape::Array(_))
    }
}

/// Parse a `<member>` or `<param>` element into a declaration
///
/// A missing `<name>` or `<type>` child means the registry is malformed.
pub fn parse_declaration(element: &Element) -> Result<Declaration, RegistryError> {
    let name = element.required_child_text("name")?;
    let ty = element
        .required_child_text("type")
        .map_err(|e| e.within(&name))?;
    let text = element.text_without("comment");
    Ok(Declaration::parse(&name, &ty, &text))
}

/// Replacement for names that are Rust keywords
pub fn rust_param_name(name: &str) -> &str {
    RESERVED_NAMES
        .iter()
        .find(|(reserved, _)| *reserved == name)
        .map(|(_, replacement)| *replacement)
        .unwrap_or(name)
}

/// Reduce a declaration to its modifier tokens and classify them
fn parse_shape(text: &str, name: &str, ty: &str) -> Shape {
    // Remove the longer token first when one contains the other
    let mut decl = if name.contains(ty) {
        text.replace(name, "").replace(ty, "")
    } else {
        text.replace(ty, "").replace(name, "")
    };
    decl = decl.replace("struct", "").replace(' ', "");

    if decl.contains('[') {
        let decl = decl.replace("const", "");
        return Shape::Array(
            decl.split(']')
                .map(|d| d.trim_start_matches('['))
                .filter(|d| !d.is_empty())
                .map(array_length)
                .collect(),
        );
    }

    let levels = pair_pointer_levels(&decl);
    if levels.is_empty() {
        Shape::Value
    } else {
        Shape::Pointer(levels)
    }
}

fn array_length(length: &str) -> ArrayLength {
    match length.parse::<usize>() {
        Ok(n) if length.chars().all(|c| c.is_ascii_digit()) => ArrayLength::Literal(n),
        _ => ArrayLength::Symbolic(length.to_string()),
    }
}

/// Pair the n-th `*` with the n-th `const`, scanning left to right
///
/// Once the `const` tokens run out one pointer level is mutable and the
/// next `const` search starts over from the beginning of the text.
fn pair_pointer_levels(decl: &str) -> Vec<Mutability> {
    let mut levels = Vec::new();
    let mut pointer = decl.find('*');
    let mut constant = decl.find("const");

    while let Some(p) = pointer {
        levels.push(if constant.is_some() {
            Mutability::Const
        } else {
            Mutability::Mut
        });
        pointer = find_from(decl, "*", p + 1);
        let from = constant.map_or(0, |c| c + 1);
        constant = find_from(decl, "const", from);
    }

    levels
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| i + from)
}
