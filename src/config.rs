//! Configuration file support for asset-sidecar.
//!
//! Provides YAML-based configuration through `asset-sidecar.config.yml` files,
//! including data structures, file loading, validation and the resolved
//! [`Settings`] the binary wires its adapters from.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::inventory::policies::{
    ChildDocumentRule, RelatedAssetRule, RelatedAssetRules, ScalarExtraRule,
};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "asset-sidecar.config.yml";

const DEFAULT_UNIFIED_INDEX: &str = "all-sources";
const DEFAULT_TENANT_CONFIG_FILE: &str = "tenants.yml";
const DEFAULT_SECRETS_DIR: &str = "secrets";
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RELATIONAL_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_RELATIONAL_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub unified_index: Option<String>,
    pub tenant_config_file: Option<PathBuf>,
    pub secrets_dir: Option<PathBuf>,
    pub secret_ref_prefix: Option<String>,
    pub search_timeout_secs: Option<u64>,
    pub relational_max_connections: Option<u32>,
    pub relational_acquire_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub related_assets: Option<RelatedAssetsConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Related-asset allow-list and per-type rules.
#[derive(Debug, Deserialize)]
pub struct RelatedAssetsConfig {
    pub allow_list: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RelatedAssetRuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedAssetRuleConfig {
    pub target_type: String,
    pub native_id_field: String,
    #[serde(default)]
    pub children: Vec<ChildDocumentConfig>,
    #[serde(default)]
    pub scalar_extras: Vec<ScalarExtraConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ChildDocumentConfig {
    pub doc_type: String,
    pub resource_id_field: String,
    pub asset_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ScalarExtraConfig {
    pub field: String,
    pub display_name: String,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\nHint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\nHint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(index) = &config.unified_index {
        if index.trim().is_empty() {
            bail!("Invalid config: unified_index must not be empty.");
        }
    }

    for (name, value) in [
        ("search_timeout_secs", config.search_timeout_secs),
        ("request_timeout_secs", config.request_timeout_secs),
        (
            "relational_acquire_timeout_secs",
            config.relational_acquire_timeout_secs,
        ),
    ] {
        if value == Some(0) {
            bail!("Invalid config: {} must be greater than 0.", name);
        }
    }

    if config.relational_max_connections == Some(0) {
        bail!("Invalid config: relational_max_connections must be greater than 0.");
    }

    if let Some(related) = &config.related_assets {
        for (i, rule) in related.rules.iter().enumerate() {
            if rule.target_type.trim().is_empty() || rule.native_id_field.trim().is_empty() {
                bail!(
                    "Invalid config: related_assets.rules[{}] needs a non-empty target_type and native_id_field.",
                    i
                );
            }
        }
        related_asset_rules(related)?;
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}

fn related_asset_rules(config: &RelatedAssetsConfig) -> Result<RelatedAssetRules> {
    let rules = config
        .rules
        .iter()
        .map(|rule| RelatedAssetRule {
            target_type: rule.target_type.trim().to_string(),
            native_id_field: rule.native_id_field.trim().to_string(),
            children: rule
                .children
                .iter()
                .map(|c| ChildDocumentRule::new(&c.doc_type, &c.resource_id_field, &c.asset_type))
                .collect(),
            scalar_extras: rule
                .scalar_extras
                .iter()
                .map(|e| ScalarExtraRule::new(&e.field, &e.display_name))
                .collect(),
        })
        .collect();

    RelatedAssetRules::new(config.allow_list.clone(), rules)
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))
}

/// Effective settings after applying defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub unified_index: String,
    pub tenant_config_file: PathBuf,
    pub secrets_dir: PathBuf,
    pub secret_ref_prefix: String,
    pub search_timeout: Duration,
    pub relational_max_connections: u32,
    pub relational_acquire_timeout: Duration,
    pub request_timeout: Duration,
    pub related_asset_rules: RelatedAssetRules,
}

impl Settings {
    /// Resolves `config` against `base_dir`, which anchors relative paths.
    pub fn resolve(config: ConfigFile, base_dir: &Path) -> Result<Self> {
        let related_asset_rules = match &config.related_assets {
            Some(related) => related_asset_rules(related)?,
            None => RelatedAssetRules::default(),
        };
        let anchor = |path: Option<PathBuf>, default: &str| {
            let path = path.unwrap_or_else(|| PathBuf::from(default));
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        Ok(Self {
            unified_index: config
                .unified_index
                .map(|i| i.trim().to_string())
                .unwrap_or_else(|| DEFAULT_UNIFIED_INDEX.to_string()),
            tenant_config_file: anchor(config.tenant_config_file, DEFAULT_TENANT_CONFIG_FILE),
            secrets_dir: anchor(config.secrets_dir, DEFAULT_SECRETS_DIR),
            secret_ref_prefix: config.secret_ref_prefix.unwrap_or_default(),
            search_timeout: Duration::from_secs(
                config.search_timeout_secs.unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS),
            ),
            relational_max_connections: config
                .relational_max_connections
                .unwrap_or(DEFAULT_RELATIONAL_MAX_CONNECTIONS),
            relational_acquire_timeout: Duration::from_secs(
                config
                    .relational_acquire_timeout_secs
                    .unwrap_or(DEFAULT_RELATIONAL_ACQUIRE_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(
                config
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            related_asset_rules,
        })
    }

    /// Loads `explicit` when given, otherwise discovers a config file in
    /// `dir`, falling back to defaults anchored at `dir`.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                let config = load_config_from_path(path)?;
                let base_dir = path.parent().unwrap_or(dir);
                Self::resolve(config, base_dir)
            }
            None => {
                let config = discover_config(dir)?.unwrap_or_default();
                Self::resolve(config, dir)
            }
        }
    }
}
