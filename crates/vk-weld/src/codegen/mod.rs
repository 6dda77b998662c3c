//! Rust code generation
//!
//! Turns a [`Resolution`] into the text of a single bindings file. The
//! file is built from ordered [`Section`]s:
//! - file header (lint attributes, `std::os::raw` imports)
//! - base types, API constants, extension names
//! - handles, function pointers, enums and bitmasks, structs and unions
//! - platform types
//! - commands (version macros and dispatch tables)
//! - result classification, when `VkResult` exists
//!
//! Generation reads the resolution only; it never marks anything used.

pub mod commands;
pub mod result;
pub mod types;

pub use commands::CommandsGenerator;
pub use result::ResultGenerator;
pub use types::TypesGenerator;

use crate::resolve::{Resolution, RESULT_TYPE};

/// Notice placed at the top of every generated file
pub const GENERATED_NOTICE: &str = "// Generated by vkweld from the Vulkan registry. Do not edit.";

/// A titled block of generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: String,
}

impl Section {
    fn new(title: &'static str, body: String) -> Self {
        Self { title, body }
    }
}

/// Generator for the complete bindings file
pub struct RustGenerator<'a> {
    resolution: &'a Resolution,
}

impl<'a> RustGenerator<'a> {
    /// Create a new generator over a finished resolution
    pub fn new(resolution: &'a Resolution) -> Self {
        Self { resolution }
    }

    /// All sections in file order
    pub fn sections(&self) -> Vec<Section> {
        let symbols = &self.resolution.symbols;
        let types = TypesGenerator::new(symbols);

        let mut sections = vec![
            Section::new("header", generate_header()),
            Section::new("base types", types.base_types()),
            Section::new(
                "api constants",
                types.enumeration(None, &self.resolution.api_constants),
            ),
            Section::new(
                "extension names",
                types.enumeration(None, &self.resolution.extension_names),
            ),
            Section::new("handles", types.handles()),
            Section::new("function pointers", types.function_pointers()),
            Section::new("enumerations", types.enumerations()),
            Section::new("structs", types.structs()),
            Section::new("external types", types.external_types()),
            Section::new(
                "commands",
                CommandsGenerator::new(&self.resolution.commands, symbols).generate(),
            ),
        ];

        if let Some(result) = symbols.get(RESULT_TYPE).and_then(|s| s.enumeration()) {
            sections.push(Section::new("result", ResultGenerator::new(result).generate()));
        }

        sections
    }

    /// The complete file
    pub fn generate(&self) -> String {
        let sections = self.sections();
        tracing::debug!(sections = sections.len(), "generating bindings");

        let mut output = sections
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output
    }
}

fn generate_header() -> String {
    let mut output = String::new();

    output.push_str(GENERATED_NOTICE);
    output.push_str("\n\n");
    output.push_str("#![allow(non_upper_case_globals)]\n");
    output.push_str("#![allow(non_snake_case)]\n");
    output.push_str("#![allow(non_camel_case_types)]\n");
    output.push('\n');
    output.push_str("use std::os::raw::c_char;\n");
    output.push_str("use std::os::raw::c_ushort;\n");
    output.push_str("use std::os::raw::c_ulong;\n");
    output.push_str("use std::os::raw::c_void;\n");
    output.push_str("use std::mem;\n");

    output
}
