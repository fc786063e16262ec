//! Configuration types for logcast.
//!
//! [`CodecSettings`] mirrors the TOML option surface and is loaded with the
//! `config` crate on top of embedded defaults. [`CodecConfig::new`] freezes a
//! settings value into the immutable configuration shared by every decode and
//! encode call: the ordered path-rule list and the semantic field table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::semantic::SemanticTable;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_SETTINGS: &str = r#"
timestamp_field    = ""
id_field           = ""
category_field     = ""
logger_field       = ""
env_version_field  = ""
hostname_field     = ""
severity_field     = ""
pid_field          = ""
hash_identifier    = false
flatten            = false
flatten_prefix     = ""
flatten_to_strings = false
keep_fields        = []
remove_fields      = []
"#;

// ---------------------------------------------------------------------------
// Settings (serde) type
// ---------------------------------------------------------------------------

/// Recognised options. Field-name options left empty are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    pub timestamp_field: String,
    pub id_field: String,
    pub category_field: String,
    pub logger_field: String,
    pub env_version_field: String,
    pub hostname_field: String,
    pub severity_field: String,
    pub pid_field: String,

    /// Derive the identifier from the timestamp and a digest of the payload.
    pub hash_identifier: bool,

    pub flatten: bool,
    pub flatten_prefix: String,
    pub flatten_to_strings: bool,

    /// Dotted source path to dotted destination path; empty destination deletes.
    pub move_fields: BTreeMap<String, String>,
    /// Shorthand for moving a path onto itself.
    pub keep_fields: Vec<String>,
    /// Shorthand for moving a path to nowhere.
    pub remove_fields: Vec<String>,
}

impl CodecSettings {
    /// Parse settings from TOML text layered over the built-in defaults.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Load settings from a TOML file layered over the built-in defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("settings file {} does not exist", path.display());
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Move rules in key order, then keep rules, then remove rules.
    fn path_rules(&self) -> Vec<PathRule> {
        let moves = self
            .move_fields
            .iter()
            .map(|(source, destination)| PathRule::new(source, destination));
        let keeps = self.keep_fields.iter().map(|path| PathRule::new(path, path));
        let removes = self.remove_fields.iter().map(|path| PathRule::new(path, ""));
        moves.chain(keeps).chain(removes).collect()
    }
}

// ---------------------------------------------------------------------------
// Frozen configuration
// ---------------------------------------------------------------------------

/// One path rewrite. An empty destination deletes the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRule {
    pub source: String,
    pub destination: String,
}

impl PathRule {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Immutable configuration shared by all decode and encode calls.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    settings: CodecSettings,
    rules: Vec<PathRule>,
    semantic: SemanticTable,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(CodecSettings::default())
    }
}

impl From<CodecSettings> for CodecConfig {
    fn from(settings: CodecSettings) -> Self {
        Self::new(settings)
    }
}

impl CodecConfig {
    pub fn new(settings: CodecSettings) -> Self {
        let rules = settings.path_rules();
        let semantic = SemanticTable::from_settings(&settings);
        Self {
            settings,
            rules,
            semantic,
        }
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    pub fn semantic(&self) -> &SemanticTable {
        &self.semantic
    }

    pub fn hash_identifier(&self) -> bool {
        self.settings.hash_identifier
    }

    pub fn flatten(&self) -> bool {
        self.settings.flatten
    }

    pub fn flatten_prefix(&self) -> &str {
        &self.settings.flatten_prefix
    }

    pub fn flatten_to_strings(&self) -> bool {
        self.settings.flatten_to_strings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
