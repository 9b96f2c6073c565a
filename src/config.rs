//! Runtime configuration for dcos-net-setup.
//!
//! The wrapper is configured through the environment of the unit that runs
//! it. Only the exact value `false` turns IPv6 handling off; anything else,
//! including an unset variable, leaves it on.

use std::path::PathBuf;

/// Environment variable that toggles `--ipv6` prefixed invocations.
pub const IPV6_ENV: &str = "DCOS_NET_IPV6";

/// Value of [`IPV6_ENV`] assumed when it is unset.
pub const IPV6_DEFAULT: &str = "true";

/// Directory systemd-networkd reads `.network`/`.netdev` files from.
pub const DEFAULT_NETWORKD_DIR: &str = "/etc/systemd/network";

/// Configuration resolved once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether `--ipv6 <cmd>` runs `<cmd>` (true) or is skipped (false).
    pub ipv6_enabled: bool,

    /// Destination directory for networkd configuration files.
    pub networkd_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ipv6_enabled: true,
            networkd_dir: PathBuf::from(DEFAULT_NETWORKD_DIR),
        }
    }
}

impl Config {
    /// Build the config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ipv6 = lookup(IPV6_ENV).unwrap_or_else(|| IPV6_DEFAULT.to_string());

        Self {
            ipv6_enabled: ipv6 != "false",
            ..Self::default()
        }
    }
}
