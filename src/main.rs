//! dcos-net-setup: idempotent pre-start wrapper for network setup commands.
//!
//! Service units call it from `ExecStartPre=` so that commands which already
//! took effect on a previous start (a dummy link that exists, an iptables
//! rule that is present, networkd config that is current) do not fail the
//! unit. The process exits with the code the dispatcher decides on.

mod cli;
mod config;
mod context;
mod dispatch;
mod error;
mod exec;
mod exit_codes;
mod fs;
mod logging;
mod networkd;
mod platform;

#[cfg(test)]
mod test_support;

use cli::Cli;
use context::SetupContext;
use exec::SystemRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let level = logging::level_from(std::env::var(logging::LOG_ENV).ok().as_deref());
    logging::setup_logging(level);

    let ctx = SetupContext::resolve(&SystemRunner);

    match dispatch::dispatch(&ctx, &cli.args) {
        Ok(code) => ExitCode::from(exit_codes::to_process_code(code)),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(exit_codes::to_process_code(err.exit_code()))
        }
    }
}
