//! TOML configuration for the `rts` binary.
//!
//! Every section and key is optional; missing values fall back to the
//! built-in taxonomy and mappings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rts_export::RowKeyStyle;
use rts_map::FieldMapping;
use rts_model::Taxonomy;
use rts_validate::ValidationConfig;
use serde::Deserialize;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "RTS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub taxonomy: Taxonomy,
    pub mapping: MappingConfig,
    pub validation: ValidationSection,
    pub export: ExportSection,
}

/// Column overrides, internal name to wire column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    pub record_types: BTreeMap<String, String>,
    pub record_fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSection {
    pub strict_record_type_uniqueness: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub row_key_style: RowKeyStyle,
}

impl AppConfig {
    pub fn record_type_mapping(&self) -> FieldMapping {
        FieldMapping::record_types().with_overrides(&self.mapping.record_types)
    }

    pub fn record_field_mapping(&self) -> FieldMapping {
        FieldMapping::record_fields().with_overrides(&self.mapping.record_fields)
    }

    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            taxonomy: self.taxonomy.clone(),
            record_type_mapping: self.record_type_mapping(),
            record_field_mapping: self.record_field_mapping(),
            strict_record_type_uniqueness: self.validation.strict_record_type_uniqueness,
        }
    }
}

/// Parse a config file.
pub fn read_config(path: &Path) -> Result<AppConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

/// Load the config named by `explicit`, else by `RTS_CONFIG`, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => {
            let config = read_config(&path)?;
            tracing::info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(AppConfig::default()),
    }
}
