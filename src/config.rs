//! Configuration module for gofmtx.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.gofmtx.toml`, searched upward)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `GOFMTX_` and use double
//! underscores to separate nested levels:
//! - `GOFMTX_TRACE=true` sets `trace`
//! - `GOFMTX_IMPORTS__GROUP=false` sets `imports.group`
//! - `GOFMTX_REWRITE__BUILD_IN=false` sets `rewrite.build_in`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FormatError, FormatResult};
use crate::imports::GroupKind;
use crate::request::Options;
use crate::rewrite::GoVersion;

pub const CONFIG_FILE_NAME: &str = ".gofmtx.toml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Dump import groups while formatting
    #[serde(default = "default_false")]
    pub trace: bool,

    #[serde(default)]
    pub imports: ImportsConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ImportsConfig {
    /// Split imports into std / third party / local groups
    #[serde(default = "default_true")]
    pub group: bool,

    /// Order groups are emitted in
    #[serde(default = "default_group_order")]
    pub group_order: Vec<GroupKind>,

    /// Module prefixes treated as local (defaults to the go.mod module)
    #[serde(default)]
    pub local_modules: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Apply the built-in modernization rules
    #[serde(default = "default_true")]
    pub build_in: bool,

    /// Extra rules: inline `old -> new` text or rule-file paths
    #[serde(default)]
    pub rules: Vec<String>,

    /// Target Go version, e.g. "1.21" (defaults to go.mod)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_version: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FilesConfig {
    /// Leave files marked "Code generated ... DO NOT EDIT." alone
    #[serde(default = "default_true")]
    pub skip_generated: bool,

    /// Do not descend into vendor/ and testdata/ directories
    #[serde(default = "default_true")]
    pub exclude_vendor: bool,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_group_order() -> Vec<GroupKind> {
    GroupKind::default_order().to_vec()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            trace: false,
            imports: ImportsConfig::default(),
            rewrite: RewriteConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            group: true,
            group_order: default_group_order(),
            local_modules: Vec::new(),
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            build_in: true,
            rules: Vec::new(),
            go_version: None,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            skip_generated: true,
            exclude_vendor: true,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path =
            Self::find_config_file().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscore
            // stays inside field names
            .merge(Env::prefixed("GOFMTX_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find `.gofmtx.toml` from the current directory up to the root
    pub fn find_config_file() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    /// Options for the formatting passes
    pub fn to_options(&self) -> FormatResult<Options> {
        let go_version = self
            .rewrite
            .go_version
            .as_deref()
            .map(str::parse::<GoVersion>)
            .transpose()
            .map_err(|reason| FormatError::Config { reason })?;

        Ok(Options {
            trace: self.trace,
            local_modules: self.imports.local_modules.clone(),
            group: self.imports.group,
            group_order: self.imports.group_order.clone(),
            go_version,
        })
    }

    /// Create a default `.gofmtx.toml` with helpful comments in `dir`
    pub fn init_config_file(dir: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let template = r#"# gofmtx configuration file

# Version of the configuration schema
version = 1

# Dump import groups as JSON while formatting
trace = false

[imports]
# Split imports into groups separated by a blank line
group = true

# Emission order; kinds left out follow in the default order
group_order = ["std", "third_party", "local"]

# Import path prefixes treated as local.
# Empty means: the module path declared in the nearest go.mod
local_modules = []

[rewrite]
# Apply the built-in modernization rules (io/ioutil, os.SEEK_*, ...)
build_in = true

# Extra rules, inline ("io/#ioutil.ReadAll -> io.ReadAll") or rule-file paths
rules = []

# Go version rules are checked against; defaults to the go.mod `go` directive
# go_version = "1.21"

[files]
# Leave files marked "Code generated ... DO NOT EDIT." untouched
skip_generated = true

# Skip vendor/ and testdata/ directories when walking
exclude_vendor = true
"#;

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
