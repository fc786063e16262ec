//! Test builders: ergonomic constructors for settings, configs and records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use logcast::{CodecConfig, CodecSettings, Field, Record};

// ---------------------------------------------------------------------------
// SettingsBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`CodecConfig`] test fixtures.
///
/// # Example
///
/// ```rust
/// let config = SettingsBuilder::new()
///     .timestamp("@timestamp")
///     .remove("secret.token")
///     .build();
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    settings: CodecSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestamp(mut self, name: &str) -> Self {
        self.settings.timestamp_field = name.to_string();
        self
    }

    pub fn id(mut self, name: &str) -> Self {
        self.settings.id_field = name.to_string();
        self
    }

    pub fn severity(mut self, name: &str) -> Self {
        self.settings.severity_field = name.to_string();
        self
    }

    pub fn category(mut self, name: &str) -> Self {
        self.settings.category_field = name.to_string();
        self
    }

    pub fn logger(mut self, name: &str) -> Self {
        self.settings.logger_field = name.to_string();
        self
    }

    pub fn env_version(mut self, name: &str) -> Self {
        self.settings.env_version_field = name.to_string();
        self
    }

    pub fn hostname(mut self, name: &str) -> Self {
        self.settings.hostname_field = name.to_string();
        self
    }

    pub fn pid(mut self, name: &str) -> Self {
        self.settings.pid_field = name.to_string();
        self
    }

    pub fn hash_identifier(mut self) -> Self {
        self.settings.hash_identifier = true;
        self
    }

    pub fn flatten(mut self, prefix: &str) -> Self {
        self.settings.flatten = true;
        self.settings.flatten_prefix = prefix.to_string();
        self
    }

    pub fn to_strings(mut self) -> Self {
        self.settings.flatten_to_strings = true;
        self
    }

    pub fn moving(mut self, source: &str, destination: &str) -> Self {
        self.settings
            .move_fields
            .insert(source.to_string(), destination.to_string());
        self
    }

    pub fn keep(mut self, path: &str) -> Self {
        self.settings.keep_fields.push(path.to_string());
        self
    }

    pub fn remove(mut self, path: &str) -> Self {
        self.settings.remove_fields.push(path.to_string());
        self
    }

    pub fn settings(self) -> CodecSettings {
        self.settings
    }

    pub fn build(self) -> CodecConfig {
        CodecConfig::new(self.settings)
    }
}

/// Every semantic slot mapped to its conventional field name.
pub fn all_slots() -> CodecConfig {
    SettingsBuilder::new()
        .timestamp("@timestamp")
        .id("@uuid")
        .severity("severity")
        .category("type")
        .logger("logger")
        .env_version("env_version")
        .hostname("hostname")
        .pid("pid")
        .build()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Build a record holding `fields` and nothing else.
pub fn record_with(fields: Vec<Field>) -> Record {
    let mut record = Record::new();
    for field in fields {
        record.set_field(field);
    }
    record
}
