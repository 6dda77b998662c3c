//! Registry type categories and the C primitive table
//!
//! # Primitive Mapping
//!
//! | C type | Rust type |
//! |--------|-----------|
//! | `void` | `c_void` |
//! | `char` | `c_char` |
//! | `int8_t`, `int16_t`, `int32_t`, `int`, `int64_t` | `i8`, `i16`, `i32`, `i32`, `i64` |
//! | `uint8_t`, `uint16_t`, `uint32_t`, `uint64_t` | `u8`, `u16`, `u32`, `u64` |
//! | `size_t` | `usize` |
//! | `float`, `double` | `f32`, `f64` |
//!
//! Primitives are never symbols: requiring one is a no-op and they never
//! appear in a symbol's `requires` list.

use crate::ir::{Declaration, Enumeration};
use serde::{Deserialize, Serialize};
use std::fmt;

/// C primitive types the registry uses, with their Rust spelling
pub const PRIMITIVES: &[(&str, &str)] = &[
    ("void", "c_void"),
    ("char", "c_char"),
    ("int8_t", "i8"),
    ("int16_t", "i16"),
    ("int32_t", "i32"),
    ("int", "i32"),
    ("int64_t", "i64"),
    ("uint8_t", "u8"),
    ("uint16_t", "u16"),
    ("uint32_t", "u32"),
    ("uint64_t", "u64"),
    ("size_t", "usize"),
    ("float", "f32"),
    ("double", "f64"),
];

/// Rust spelling of a C primitive, if `name` is one
pub fn primitive_spelling(name: &str) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(c, _)| *c == name)
        .map(|(_, rust)| *rust)
}

/// Check whether `name` is a C primitive
pub fn is_primitive(name: &str) -> bool {
    primitive_spelling(name).is_some()
}

/// The kind of a registry symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// `typedef <primitive> VkX;`
    BaseType,
    /// Opaque handle
    Handle,
    /// Flags type backed by an integer, bits live in a separate enum
    Bitmask,
    /// Enumeration of named values
    Enum,
    Struct,
    Union,
    /// Function pointer type (built in, not parsed from the registry)
    FuncPointer,
    /// Type owned by a platform header (X11, Win32, ...)
    External,
}

impl Category {
    /// Registry `category` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BaseType => "basetype",
            Category::Handle => "handle",
            Category::Bitmask => "bitmask",
            Category::Enum => "enum",
            Category::Struct => "struct",
            Category::Union => "union",
            Category::FuncPointer => "funcpointer",
            Category::External => "exttype",
        }
    }

    /// Parse a registry `category` attribute; categories that are not
    /// ingested (`define`, `include`, `funcpointer`) yield `None`
    pub fn from_registry(s: &str) -> Option<Self> {
        match s {
            "basetype" => Some(Category::BaseType),
            "handle" => Some(Category::Handle),
            "bitmask" => Some(Category::Bitmask),
            "enum" => Some(Category::Enum),
            "struct" => Some(Category::Struct),
            "union" => Some(Category::Union),
            _ => None,
        }
    }

    /// Whether emission keeps the registry name verbatim (no `Vk` stripping)
    pub fn keeps_registry_name(&self) -> bool {
        matches!(self, Category::FuncPointer | Category::External)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category specific data of a symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Underlying registry type name
    BaseType { underlying: String },
    /// First parent handle, if any
    Handle { parent: Option<String> },
    /// Enum and bitmask members
    Enumeration(Enumeration),
    /// Struct and union members
    Members {
        members: Vec<Declaration>,
        /// Set by the debug-derive inference pass
        derive_debug: bool,
    },
    /// Rust spelling used verbatim (function pointers, platform types)
    Verbatim { spelling: String },
}

/// A named registry entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub category: Category,
    pub payload: Payload,
    /// Names this symbol's definition references
    pub requires: Vec<String>,
    /// Set once by the resolver, never cleared
    pub used: bool,
}

impl Symbol {
    /// Create a new, unused symbol
    pub fn new(name: impl Into<String>, category: Category, payload: Payload) -> Self {
        Self {
            name: name.into(),
            category,
            payload,
            requires: Vec::new(),
            used: false,
        }
    }

    /// Add a dependency edge, skipping primitives and duplicates
    pub fn requires(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !is_primitive(&name) && !self.requires.contains(&name) {
            self.requires.push(name);
        }
        self
    }

    /// Set dependency edges
    pub fn with_requires<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |s, n| s.requires(n))
    }

    /// Enumeration payload, if this is an enum or bitmask
    pub fn enumeration(&self) -> Option<&Enumeration> {
        match &self.payload {
            Payload::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    /// Mutable enumeration payload
    pub fn enumeration_mut(&mut self) -> Option<&mut Enumeration> {
        match &mut self.payload {
            Payload::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    /// Struct or union members
    pub fn members(&self) -> &[Declaration] {
        match &self.payload {
            Payload::Members { members, .. } => members,
            _ => &[],
        }
    }

    /// Whether the struct derives `Debug`
    pub fn derives_debug(&self) -> bool {
        matches!(self.payload, Payload::Members { derive_debug: true, .. })
    }
}
