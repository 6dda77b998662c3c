//! vkweld: generate Rust Vulkan bindings from `vk.xml`
//!
//! ```text
//! vkweld --registry vk.xml --output src/lib.rs --version VK_VERSION_1_1
//! vkweld --config vkweld.toml --exclude VK_KHR_display
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vk_weld::{GeneratorBuilder, GeneratorConfig};

/// Generate Rust FFI bindings from the Vulkan XML registry
#[derive(Parser, Debug)]
#[command(name = "vkweld")]
#[command(about = "Generate Rust FFI bindings from the Vulkan XML registry")]
struct Cli {
    /// TOML config file; the flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to vk.xml
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Generated Rust file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// API version to activate (repeatable)
    #[arg(long = "version", value_name = "VK_VERSION_X_Y")]
    versions: Vec<String>,

    /// Extension to skip (repeatable)
    #[arg(long = "exclude", value_name = "EXTENSION")]
    exclude: Vec<String>,

    /// Also write the resolved closure as JSON
    #[arg(long)]
    closure_json: Option<PathBuf>,

    /// Log at debug level unless VKWELD_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Load the config file, if any, and apply the flag overrides
    fn into_config(self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if self.registry.is_some() {
            config.registry = self.registry;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if !self.versions.is_empty() {
            config.versions = self.versions;
        }
        config.exclude_extensions.extend(self.exclude);
        if self.closure_json.is_some() {
            config.closure_json = self.closure_json;
        }

        if config.registry.is_none() {
            bail!("no registry given: pass --registry or set `registry` in the config file");
        }
        if config.output.is_none() {
            bail!("no output given: pass --output or set `output` in the config file");
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    // VKWELD_LOG wins over --verbose
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("VKWELD_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config()?;
    tracing::debug!(?config, "effective config");
    let builder = GeneratorBuilder::from_config(&config).context("configuring generator")?;
    let output = builder.build().context("generating bindings")?;

    println!(
        "Wrote {} ({} commands, {} types)",
        output.output.display(),
        output.command_count,
        output.type_count
    );
    if let Some(path) = &output.closure_json {
        println!("Wrote closure report {}", path.display());
    }
    if !output.diagnostics.is_empty() {
        println!("{} warning(s):", output.diagnostics.len());
        for diagnostic in &output.diagnostics {
            println!("  {}", diagnostic.format());
        }
    }

    Ok(())
}
