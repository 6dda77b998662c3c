//! Generation driver
//!
//! - [`GeneratorConfig`]: TOML configuration
//! - [`GeneratorBuilder`]: parse, resolve, emit and write in one call

pub mod config;
pub mod generator;

pub use config::GeneratorConfig;
pub use generator::{BuildOutput, GeneratorBuilder};
