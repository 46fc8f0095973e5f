//! Configuration for importance resolution.
//!
//! Uses `figment` for layered configuration: defaults -> user config -> workspace
//! config -> environment -> explicit overrides.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Order of the returned importance records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
    /// Original vector order; ranks are still filled in.
    Unsorted,
}

/// Resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Output ordering of `resolve()`.
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `FEATRANK_`)
/// 3. Workspace-local config (`.featrank/config.toml`)
/// 4. User config (`~/.config/featrank/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&ResolverConfig>,
) -> Result<ResolverConfig> {
    let mut figment = Figment::from(Serialized::defaults(ResolverConfig::default()));

    if let Some(dirs) = directories::ProjectDirs::from("dev", "featrank", "featrank") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".featrank").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // FEATRANK_SORT_ORDER=ascending
    figment = figment.merge(Env::prefixed("FEATRANK_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let config = figment.extract().map_err(Box::new)?;
    tracing::debug!(?config, "Loaded resolver configuration");
    Ok(config)
}
