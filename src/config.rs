use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use crate::error::AtriumError;

const DEFAULT_CONFIG_FILE: &str = "atrium.toml";

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// Env: `ATRIUM_LISTEN_ADDR`. Default: `127.0.0.1`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// Env: `ATRIUM_LISTEN_PORT`. Default: `4000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization
    /// (e.g., "error", "warn", "info", "debug", "trace").
    /// Env: `ATRIUM_LOGLEVEL`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Active database profile name.
    /// Env: `ATRIUM_ENV`. Default: `development`.
    #[serde(default = "default_env")]
    pub env: String,

    /// Environment-keyed database profiles (see `[profiles.*]` in atrium.toml).
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<String, DatabaseProfile>,
}

/// Connection parameters for one environment.
///
/// Only `database` is meaningful for SQLite; `username`/`password` and any
/// extra keys are retained verbatim for stores that need them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseProfile {
    /// Database name, file path, or full connection URL.
    pub database: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Dialect-specific options, passed through untouched.
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl DatabaseProfile {
    /// Connection URL for the profile. A `database` that already looks like a
    /// URL is used verbatim; a bare name or path becomes a SQLite URL.
    pub fn url(&self) -> String {
        if self.database.contains("://") || self.database.starts_with("sqlite:") {
            self.database.clone()
        } else {
            format!("sqlite:{}", self.database)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: default_loglevel(),
            env: default_env(),
            profiles: default_profiles(),
        }
    }
}

impl Config {
    /// Builds a Figment that merges defaults, an optional `atrium.toml`, and
    /// `ATRIUM_`-prefixed environment variables (highest precedence).
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed("ATRIUM_"))
    }

    /// Loads configuration from defaults, the optional config file, and the
    /// environment.
    pub fn load() -> Self {
        Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration via Figment: {err}"))
    }

    /// The database profile selected by `env`. An unknown profile name is a
    /// startup error, never a silent fallback.
    pub fn database(&self) -> Result<&DatabaseProfile, AtriumError> {
        self.profiles
            .get(&self.env)
            .ok_or_else(|| AtriumError::UnknownProfile(self.env.clone()))
    }
}

fn default_listen_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_listen_port() -> u16 {
    4000
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_env() -> String {
    "development".to_string()
}

fn default_profiles() -> BTreeMap<String, DatabaseProfile> {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        "development".to_string(),
        DatabaseProfile {
            database: "atrium.db".to_string(),
            ..DatabaseProfile::default()
        },
    );
    profiles
}
