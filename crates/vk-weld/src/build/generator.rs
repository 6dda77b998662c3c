//! GeneratorBuilder: registry file in, bindings file out

use crate::build::GeneratorConfig;
use crate::codegen::RustGenerator;
use crate::diagnostics::{Diagnostic, GeneratorError};
use crate::registry::Registry;
use crate::resolve::{Policy, Resolution};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for one generation run
///
/// # Example
/// ```ignore
/// use vk_weld::build::GeneratorBuilder;
///
/// fn main() {
///     GeneratorBuilder::new("vk.xml")
///         .output("src/lib.rs")
///         .versions(&["VK_VERSION_1_0", "VK_VERSION_1_1"])
///         .exclude_extensions(&["VK_KHR_display"])
///         .build()
///         .expect("Failed to generate bindings");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    registry: PathBuf,
    output: Option<PathBuf>,
    policy: Policy,
    closure_json: Option<PathBuf>,
}

impl GeneratorBuilder {
    /// Create a builder reading the registry at `registry`
    pub fn new(registry: impl AsRef<Path>) -> Self {
        Self {
            registry: registry.as_ref().to_path_buf(),
            output: None,
            policy: Policy::default(),
            closure_json: None,
        }
    }

    /// Create a builder from a loaded config
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let registry = config
            .registry
            .as_ref()
            .ok_or(GeneratorError::MissingRegistry)?;

        let mut builder = Self::new(registry).versions(config.versions.as_slice());
        builder.policy = builder.policy.exclude(config.exclude_extensions.iter().cloned());
        builder.output = config.output.clone();
        builder.closure_json = config.closure_json.clone();
        Ok(builder)
    }

    /// Set the path of the generated Rust file
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the activated API versions
    pub fn versions<S: AsRef<str>>(mut self, versions: &[S]) -> Self {
        self.policy = self
            .policy
            .versions(versions.iter().map(|v| v.as_ref().to_string()));
        self
    }

    /// Skip these extensions
    pub fn exclude_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.policy = self
            .policy
            .exclude(extensions.iter().map(|e| e.as_ref().to_string()));
        self
    }

    /// Also write the resolved closure as JSON
    pub fn closure_json(mut self, path: impl AsRef<Path>) -> Self {
        self.closure_json = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read the registry and resolve it without writing anything
    pub fn resolve(&self) -> Result<Resolution, GeneratorError> {
        if !self.registry.exists() {
            return Err(GeneratorError::RegistryNotFound(self.registry.clone()));
        }
        let registry = Registry::from_path(&self.registry)?;
        Resolution::resolve(&registry, &self.policy)
    }

    /// Generate the bindings
    ///
    /// This will:
    /// 1. Read and ingest the registry
    /// 2. Resolve the configured versions and extensions
    /// 3. Write the bindings file
    /// 4. Optionally write the closure report
    pub fn build(self) -> Result<BuildOutput, GeneratorError> {
        let output = self.output.clone().ok_or(GeneratorError::MissingOutput)?;
        let resolution = self.resolve()?;

        write_file(&output, &RustGenerator::new(&resolution).generate())?;
        tracing::info!(output = %output.display(), "wrote bindings");

        if let Some(ref path) = self.closure_json {
            write_file(path, &resolution.closure().to_json()?)?;
            tracing::info!(closure = %path.display(), "wrote closure report");
        }

        Ok(BuildOutput {
            output,
            closure_json: self.closure_json,
            command_count: resolution.commands.activation_order().len(),
            type_count: resolution.symbols.used_count(),
            diagnostics: resolution.diagnostics.into_diagnostics(),
        })
    }
}

/// Result of a successful build
#[derive(Debug)]
pub struct BuildOutput {
    /// Path to the generated Rust file
    pub output: PathBuf,
    /// Path to the closure report (if requested)
    pub closure_json: Option<PathBuf>,
    /// Activated commands
    pub command_count: usize,
    /// Used types
    pub type_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

fn write_file(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
