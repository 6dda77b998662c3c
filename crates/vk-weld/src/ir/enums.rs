//! Enumeration model: literal parsing and incremental extension
//!
//! Registry enum values arrive as C literals (`"(~0U)"`, `"1000.0f"`,
//! `"-1"`), bit positions, or extension-relative offsets. Each is turned
//! into a scalar type tag plus Rust literal text ready for emission.

use crate::diagnostics::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// First value reserved for extension enumerants
pub const EXTENSION_ENUM_BASE: i64 = 1_000_000_000;

/// Size of the value block each extension number owns
pub const EXTENSION_ENUM_BLOCK: i64 = 1000;

/// Highest bit position a flag constant can hold
pub const MAX_BITPOS: u32 = 63;

/// Rust scalar type of a constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    U32,
    I32,
    U64,
    F32,
    F64,
    /// String constants (extension names)
    Str,
}

impl ScalarType {
    /// Rust spelling
    pub fn as_rust(&self) -> &'static str {
        match self {
            ScalarType::U32 => "u32",
            ScalarType::I32 => "i32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Str => "&str",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rust())
    }
}

/// A parsed constant value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    pub scalar: ScalarType,
    /// Rust literal text, e.g. `1000.0f32` or `-1i32 as u32`
    pub text: String,
}

impl EnumValue {
    /// Whether the literal is negative (error-code style)
    pub fn is_negative(&self) -> bool {
        self.text.starts_with('-')
    }
}

/// One member of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: EnumValue,
}

impl EnumMember {
    /// Create a member
    pub fn new(name: impl Into<String>, value: EnumValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Name without the `VK_` prefix
    pub fn rust_name(&self) -> &str {
        self.name.strip_prefix("VK_").unwrap_or(&self.name)
    }
}

/// Members of an enum, bitmask or constant group, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enumeration {
    /// Registry name of the backing integer type; `None` for free constants
    pub int_type: Option<String>,
    pub members: Vec<EnumMember>,
}

impl Enumeration {
    /// Create an empty enumeration backed by `int_type`
    pub fn new(int_type: impl Into<String>) -> Self {
        Self {
            int_type: Some(int_type.into()),
            members: Vec::new(),
        }
    }

    /// Create an empty group of free constants
    pub fn constants() -> Self {
        Self::default()
    }

    /// Append a member unless one with the same name exists
    ///
    /// Returns whether the member was added.
    pub fn extend(&mut self, member: EnumMember) -> bool {
        if self.contains(&member.name) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Whether a member with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Look up a member by name
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Parse a registry `value` literal
pub fn parse_value(raw: &str) -> EnumValue {
    let mut val = raw.trim_matches(|c| c == '(' || c == ')').to_string();
    let mut suffix = String::new();

    if let Some((base, adjust)) = split_adjustment(&val) {
        suffix = adjust;
        val = base;
    }

    let mut scalar = ScalarType::U32;
    if val.contains('.') {
        scalar = ScalarType::F64;
    }
    if let Some(stripped) = val.strip_suffix('f') {
        scalar = ScalarType::F32;
        val = stripped.to_string();
    }
    if let Some(stripped) = val.strip_suffix("ULL") {
        scalar = ScalarType::U64;
        val = stripped.to_string();
    }
    if let Some(stripped) = val.strip_suffix('U') {
        val = stripped.to_string();
    }

    if let Some(rest) = val.strip_prefix('~') {
        val = format!("!{}", rest);
    }
    if val.starts_with('-') {
        suffix.push_str(&format!("i32 as {}", scalar));
    } else {
        suffix.push_str(scalar.as_rust());
    }

    EnumValue {
        scalar,
        text: val + &suffix,
    }
}

/// Split `base-adjust` / `base+adjust` into `base` and ` - adjust`
///
/// A leading minus is a sign, not an adjustment, and only one split is made.
fn split_adjustment(val: &str) -> Option<(String, String)> {
    if val.contains('-') {
        let parts: Vec<&str> = val.split('-').collect();
        if parts.len() == 2 && !parts[0].is_empty() {
            return Some((parts[0].to_string(), format!(" - {}", parts[1])));
        }
        return None;
    }
    val.split_once('+')
        .filter(|(base, _)| !base.is_empty())
        .map(|(base, adjust)| (base.to_string(), format!(" + {}", adjust)))
}

/// Parse a registry `bitpos` attribute into a shifted value
pub fn parse_bitpos(raw: &str) -> Result<EnumValue, RegistryError> {
    let bit = raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|bit| *bit <= MAX_BITPOS)
        .ok_or_else(|| RegistryError::InvalidNumber {
            attribute: "bitpos".to_string(),
            value: raw.to_string(),
            context: "enum".to_string(),
        })?;
    Ok(bit_value(bit))
}

/// Value of a single set bit, `1 << bit`
///
/// Positions from 32 up belong to 64-bit flag blocks and are typed `u64`.
pub fn bit_value(bit: u32) -> EnumValue {
    let scalar = if bit < 32 {
        ScalarType::U32
    } else {
        ScalarType::U64
    };
    EnumValue {
        scalar,
        text: format!("1 << {}", bit),
    }
}

/// Direction of an offset-based enumerant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Positive,
    /// `dir="-"`, used for error codes
    Negative,
}

impl Direction {
    /// Parse the optional `dir` attribute
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            Some("-") => Direction::Negative,
            _ => Direction::Positive,
        }
    }
}

/// Absolute value of an enumerant given by extension number and offset
///
/// `base + 1000 * (extension_number - 1) + offset`, negated for
/// [`Direction::Negative`].
pub fn parse_extension_offset(extension_number: u32, offset: u32, direction: Direction) -> i64 {
    let value = EXTENSION_ENUM_BASE
        + EXTENSION_ENUM_BLOCK * (i64::from(extension_number) - 1)
        + i64::from(offset);
    match direction {
        Direction::Positive => value,
        Direction::Negative => -value,
    }
}

/// String constant member, as used for `*_EXTENSION_NAME` values
pub fn string_member(name: impl Into<String>, quoted: &str) -> EnumMember {
    let text = if quoted.starts_with('"') {
        quoted.to_string()
    } else {
        format!("\"{}\"", quoted)
    };
    EnumMember::new(
        name,
        EnumValue {
            scalar: ScalarType::Str,
            text,
        },
    )
}
