//! Generator configuration loaded from TOML
//!
//! ```toml
//! registry = "vk.xml"
//! output = "src/lib.rs"
//! versions = ["VK_VERSION_1_0", "VK_VERSION_1_1"]
//! exclude_extensions = ["VK_KHR_display"]
//! closure_json = "closure.json"
//! ```
//!
//! Relative paths are taken relative to the directory of the file.

use crate::diagnostics::GeneratorError;
use crate::resolve::DEFAULT_VERSIONS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a generator config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Path to `vk.xml`
    pub registry: Option<PathBuf>,
    /// Path of the generated Rust file
    pub output: Option<PathBuf>,
    #[serde(default = "default_versions")]
    pub versions: Vec<String>,
    #[serde(default)]
    pub exclude_extensions: Vec<String>,
    /// Where to dump the resolved closure as JSON
    pub closure_json: Option<PathBuf>,
}

fn default_versions() -> Vec<String> {
    DEFAULT_VERSIONS.iter().map(|v| v.to_string()).collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            registry: None,
            output: None,
            versions: default_versions(),
            exclude_extensions: Vec::new(),
            closure_json: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse a config document
    pub fn from_toml(content: &str) -> Result<Self, GeneratorError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file, resolving its paths against the file's directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(config = %path.display(), "loaded generator config");

        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(config.relative_to(dir)),
            _ => Ok(config),
        }
    }

    /// Join every relative path onto `dir`
    pub fn relative_to(mut self, dir: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.registry = self.registry.map(join);
        self.output = self.output.map(join);
        self.closure_json = self.closure_json.map(join);
        self
    }
}
