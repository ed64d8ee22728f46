//! Layered daemon configuration.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. A TOML file: `$EXAMDESK_CONFIG` if set, else `./examdesk.toml` when present
//! 3. `EXAMDESK_*` environment variables (`EXAMDESK_ID_STRATEGY=uuid`, ...)

use crate::records::IdStrategy;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "EXAMDESK_";
const CONFIG_PATH_ENV: &str = "EXAMDESK_CONFIG";
const LOCAL_CONFIG_FILE: &str = "examdesk.toml";

const fn default_list_limit() -> usize {
    4
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeskConfig {
    /// Directory holding `colleges.json`, `exams.json`, `students.json` and
    /// `members.json`. Unset means the fixtures compiled into the binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,

    #[serde(default)]
    pub id_strategy: IdStrategy,

    /// Require `actorId` with a matching permission on mutating methods.
    #[serde(default)]
    pub enforce_permissions: bool,

    /// Used when `EXAMDESK_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Row limit for `exams.upcoming` and `exams.performance`.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            id_strategy: IdStrategy::default(),
            enforce_permissions: false,
            log_level: default_log_level(),
            default_list_limit: default_list_limit(),
        }
    }
}

impl DeskConfig {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                let local = PathBuf::from(LOCAL_CONFIG_FILE);
                local.exists().then_some(local)
            });
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }

        // EXAMDESK_CONFIG names the file; it is not a setting.
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config", "log"]))
    }
}
