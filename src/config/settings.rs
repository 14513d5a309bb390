// Configuration structs

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_CENTRAL_URL, DEFAULT_CLI_PATH, DEFAULT_REQUEST_TIMEOUT_SECS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path (or bare name, resolved on PATH) of the daemon CLI
    pub cli_path: String,

    /// Base URL of the Central API
    pub central_url: String,

    /// Central API token. Can also come from ZEROTIER_CENTRAL_TOKEN or --api-key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout for Central calls, in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cli_path: DEFAULT_CLI_PATH.to_string(),
            central_url: DEFAULT_CENTRAL_URL.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cli_path.trim().is_empty() {
            anyhow::bail!("cli_path must not be empty");
        }

        if self.central_url.trim().is_empty() {
            anyhow::bail!("central_url must not be empty");
        }

        if !self.central_url.starts_with("http://") && !self.central_url.starts_with("https://") {
            anyhow::bail!(
                "central_url must start with http:// or https:// (got '{}')",
                self.central_url
            );
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }

        Ok(())
    }

    /// API key to use, preferring an explicit override (e.g. a CLI flag)
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}
