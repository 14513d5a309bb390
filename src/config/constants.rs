// Project-wide constants
//
// Centralised here so endpoints and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Daemon CLI looked up on PATH when no path is configured.
pub const DEFAULT_CLI_PATH: &str = "zerotier-cli";

/// ZeroTier Central (hosted controller) base URL.
pub const DEFAULT_CENTRAL_URL: &str = "https://my.zerotier.com";

/// Default timeout for Central API requests.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable carrying the Central API token.
pub const ENV_API_KEY: &str = "ZEROTIER_CENTRAL_TOKEN";

/// Environment variable overriding the daemon CLI path.
pub const ENV_CLI_PATH: &str = "ZEROTIER_CLI";

/// Config directory under the user's home directory.
pub const CONFIG_DIR: &str = ".zerotier-state";
