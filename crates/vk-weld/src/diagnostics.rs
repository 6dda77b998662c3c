//! Error types and diagnostics
//!
//! Structural problems in the registry (a command without `<proto>`, a member
//! without `<name>`) are hard errors and stop the run. Everything else that
//! looks wrong but can be skipped, such as a requirement naming a type the
//! registry never declares, is recorded as a [`Diagnostic`] and generation
//! carries on.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for vk-weld operations
pub type WeldResult<T> = Result<T, GeneratorError>;

/// Errors raised while turning the registry document into typed entities
#[derive(Debug, Error)]
pub enum RegistryError {
    /// IO error while reading the registry
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] xml::reader::Error),

    /// The document has no root element
    #[error("registry document is empty")]
    EmptyDocument,

    /// A required child element is missing
    #[error("<{parent}> without <{child}> child{}", context_suffix(.context))]
    MissingElement {
        parent: String,
        child: String,
        context: Option<String>,
    },

    /// A required attribute is missing
    #[error("<{element}> without `{attribute}` attribute{}", context_suffix(.context))]
    MissingAttribute {
        element: String,
        attribute: String,
        context: Option<String>,
    },

    /// A numeric attribute did not parse
    #[error("invalid number `{value}` in `{attribute}` of {context}")]
    InvalidNumber {
        attribute: String,
        value: String,
        context: String,
    },
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(context) => format!(" (in {})", context),
        None => String::new(),
    }
}

impl RegistryError {
    /// Create a missing element error
    pub fn missing_element(parent: impl Into<String>, child: impl Into<String>) -> Self {
        RegistryError::MissingElement {
            parent: parent.into(),
            child: child.into(),
            context: None,
        }
    }

    /// Create a missing attribute error
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        RegistryError::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
            context: None,
        }
    }

    /// Attach the name of the enclosing entity
    pub fn within(self, name: impl Into<String>) -> Self {
        let name = name.into();
        match self {
            RegistryError::MissingElement { parent, child, .. } => RegistryError::MissingElement {
                parent,
                child,
                context: Some(name),
            },
            RegistryError::MissingAttribute {
                element, attribute, ..
            } => RegistryError::MissingAttribute {
                element,
                attribute,
                context: Some(name),
            },
            other => other,
        }
    }
}

/// Errors raised by the generator as a whole
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The registry could not be ingested
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// IO error while reading input or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file does not exist
    #[error("Registry not found: {0}")]
    RegistryNotFound(PathBuf),

    /// Configuration file is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Closure report could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Builder was not given an output path
    #[error("no output path configured")]
    MissingOutput,

    /// Configuration names no registry file
    #[error("no registry path configured")]
    MissingRegistry,

    /// A version name is not of the form `VK_VERSION_<major>_<minor>`
    #[error("invalid version name: {0}")]
    InvalidVersion(String),
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Something was skipped and the output may be incomplete
    Warning,
    /// Informational message
    Info,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

/// Categories of non-fatal anomalies found while resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyCode {
    /// A required type is not in the symbol table
    TypeNotFound,
    /// A required command is not in the command table
    CommandNotFound,
    /// A selected version has no `<feature>` block
    FeatureNotFound,
    /// A registry type was recognised but cannot be represented
    UnsupportedType,
    /// `VkResult` is absent so no result classification is generated
    MissingResultType,
}

impl AnomalyCode {
    /// Stable code string
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyCode::TypeNotFound => "type-not-found",
            AnomalyCode::CommandNotFound => "command-not-found",
            AnomalyCode::FeatureNotFound => "feature-not-found",
            AnomalyCode::UnsupportedType => "unsupported-type",
            AnomalyCode::MissingResultType => "missing-result-type",
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Diagnostic code (for categorization)
    pub code: AnomalyCode,
    /// Registry name the diagnostic is about
    pub symbol: String,
    /// Message
    pub message: String,
}

impl Diagnostic {
    /// Create a warning diagnostic
    pub fn warning(code: AnomalyCode, symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            code,
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        format!(
            "{}[{}]: {}",
            self.severity.display(),
            self.code.as_str(),
            self.message
        )
    }
}

/// Collector for anomalies found during one generation run
///
/// Each (code, symbol) pair is kept once, however often it is hit.
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
    seen: HashSet<(AnomalyCode, String)>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, logging it the first time it is seen
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if !self.seen.insert((diagnostic.code, diagnostic.symbol.clone())) {
            return;
        }
        tracing::warn!(code = diagnostic.code.as_str(), "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Record a type that could not be found
    pub fn type_not_found(&mut self, name: &str) {
        self.add(Diagnostic::warning(
            AnomalyCode::TypeNotFound,
            name,
            format!("type not found: {}", name),
        ));
    }

    /// Record a command that could not be found
    pub fn command_not_found(&mut self, name: &str) {
        self.add(Diagnostic::warning(
            AnomalyCode::CommandNotFound,
            name,
            format!("command not found: {}", name),
        ));
    }

    /// Check whether any diagnostic with this code was recorded
    pub fn has(&self, code: AnomalyCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take ownership of the diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
