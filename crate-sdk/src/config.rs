use std::path::PathBuf;

use figment::providers::Env;
use figment::Figment;
use serde::Deserialize;
use url::Url;

use crate::error::Result;

/// engine configuration. everything has a default so `ClientConfig::default()`
/// talks to a local dev server out of the box.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// http(s) origin of the server; the socket url and the `/api` surface
    /// are derived from it
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// where durable client state (server folders) lives
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:8080").expect("static url")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".concord")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_dir: default_data_dir(),
        }
    }
}

impl ClientConfig {
    /// load from `CONCORD_`-prefixed environment variables
    /// (`CONCORD_BASE_URL`, `CONCORD_DATA_DIR`), falling back to defaults
    pub fn from_env() -> Result<Self> {
        Ok(Figment::new()
            .merge(Env::prefixed("CONCORD_"))
            .extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.scheme(), "http");
        assert_eq!(config.data_dir, PathBuf::from(".concord"));
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CONCORD_BASE_URL", "https://chat.example.org");
            let config = ClientConfig::from_env().unwrap();
            assert_eq!(config.base_url.as_str(), "https://chat.example.org/");
            Ok(())
        });
    }
}
