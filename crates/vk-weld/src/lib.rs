//! vk-weld: Rust FFI bindings generated from the Vulkan XML registry
//!
//! Reads `vk.xml`, resolves what the selected API versions and extensions
//! require, and writes one Rust source file with the types, constants,
//! dispatch tables and result helpers for exactly that closure.
//!
//! # Architecture
//!
//! - `registry`: XML document and typed ingestion
//! - `ir`: declarations, symbols, enumerations, commands, features
//! - `resolve`: requirement resolution and the closure report
//! - `codegen`: Rust code generation
//! - `build`: configuration and the generator builder
//! - `diagnostics`: errors and non-fatal anomalies
//!
//! # Usage
//!
//! ```rust,ignore
//! use vk_weld::build::GeneratorBuilder;
//!
//! fn main() {
//!     GeneratorBuilder::new("vk.xml")
//!         .output("src/lib.rs")
//!         .versions(&["VK_VERSION_1_0", "VK_VERSION_1_1"])
//!         .build()
//!         .expect("Failed to generate bindings");
//! }
//! ```

pub mod build;
pub mod codegen;
pub mod diagnostics;
pub mod ir;
pub mod registry;
pub mod resolve;

// Re-export commonly used types
pub use build::{BuildOutput, GeneratorBuilder, GeneratorConfig};
pub use codegen::{RustGenerator, Section};
pub use diagnostics::{
    AnomalyCode, Diagnostic, DiagnosticsCollector, GeneratorError, RegistryError, WeldResult,
};
pub use ir::{
    ApiVersion, Category, CommandTable, Declaration, DispatchLevel, Enumeration, Feature, Symbol,
    SymbolTable,
};
pub use registry::Registry;
pub use resolve::{Closure, Policy, Resolution};
