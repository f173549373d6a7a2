use std::{collections::HashMap, path::PathBuf, time::Duration};

use config::{Config as ConfigLib, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub library: LibraryConfig,
    #[serde(default)]
    pub xmds: Option<XmdsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    pub path: PathBuf,
    pub blacklist_file: String,
}

impl LibraryConfig {
    /// Location of the blacklist file inside the media library.
    pub fn blacklist_path(&self) -> PathBuf {
        self.path.join(&self.blacklist_file)
    }
}

/// Connection details for the CMS web service (XMDS).
#[derive(Debug, Clone, Deserialize)]
pub struct XmdsConfig {
    pub url: String,
    pub server_key: SecretString,
    pub hardware_key: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl XmdsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLib::builder()
            .set_default("library.path", ".")?
            .set_default("library.blacklist_file", "blacklist.xml")?
            .add_source(File::with_name("config/settings").required(false));

        // Explicit overrides keep tests independent of the process environment
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // e.g. SIGNAGE_LIBRARY__PATH or SIGNAGE_XMDS__SERVER_KEY
            builder = builder.add_source(
                Environment::with_prefix("SIGNAGE")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }
}
