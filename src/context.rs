//! Per-invocation context for dcos-net-setup.
//!
//! Bundles the command runner, the resolved configuration and the platform
//! identity so that dispatch code never reaches for process globals.

use crate::config::Config;
use crate::exec::CommandRunner;
use crate::platform::Platform;

/// Everything a dispatch needs besides its argument vector.
pub struct SetupContext<'a> {
    /// Executes child commands.
    pub runner: &'a dyn CommandRunner,

    /// Environment-derived settings.
    pub config: Config,

    /// Identity of the host the wrapper runs on.
    pub platform: Platform,
}

impl<'a> SetupContext<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: Config, platform: Platform) -> Self {
        Self {
            runner,
            config,
            platform,
        }
    }

    /// Resolve config and platform from the running process.
    pub fn resolve(runner: &'a dyn CommandRunner) -> Self {
        Self::new(runner, Config::from_env(), Platform::current())
    }
}
