//! Command dispatcher for dcos-net-setup.
//!
//! Classifies the argument vector and runs it so that repeating a command
//! that already took effect still exits 0:
//! - `ip link add` / `ip addr add` / `ip -6 addr ...`: "File exists" is success
//! - `iptables ... -A|-I ...`: the rule is checked with `-C` first
//! - `--ipv6 <cmd>`: `<cmd>` is skipped when `DCOS_NET_IPV6=false`
//! - `networkd add <file>`: see [`crate::networkd`]
//! - anything else runs unchanged

#[cfg(test)]
mod tests;

use crate::context::SetupContext;
use crate::error::{Result, SetupError};
use crate::exec::{Capture, run};
use crate::exit_codes;
use crate::networkd;
use std::path::Path;

/// Marker that gates a command on IPv6 being enabled.
pub const IPV6_MARKER: &str = "--ipv6";

/// `ip` invocations whose "already exists" failure is tolerated.
const IP_ADD_PREFIXES: [[&str; 3]; 3] = [
    ["ip", "link", "add"],
    ["ip", "addr", "add"],
    ["ip", "-6", "addr"],
];

/// Trailing stderr text of `ip` when the link or address is already there.
const FILE_EXISTS: &[u8] = b"File exists";

/// How an argument vector is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `ip` add command tolerating duplicates.
    IpAdd,
    /// `iptables` rule insertion guarded by a check.
    Iptables,
    /// `--ipv6` prefix; the rest runs only with IPv6 enabled.
    Ipv6(&'a [String]),
    /// `networkd add <file>`.
    NetworkdAdd(&'a str),
    /// Run verbatim.
    Passthrough,
}

/// Decide how `args` should be handled. The first matching rule wins.
pub fn classify(args: &[String]) -> Route<'_> {
    if IP_ADD_PREFIXES.iter().any(|prefix| starts_with(args, prefix)) {
        return Route::IpAdd;
    }

    match args {
        [first, ..] if first == "iptables" => Route::Iptables,
        [first, rest @ ..] if first == IPV6_MARKER => Route::Ipv6(rest),
        [first, second, path] if first == "networkd" && second == "add" => {
            Route::NetworkdAdd(path)
        }
        _ => Route::Passthrough,
    }
}

fn starts_with(args: &[String], prefix: &[&str]) -> bool {
    args.len() >= prefix.len() && args.iter().zip(prefix).all(|(a, p)| a == p)
}

/// Run `args` according to its route and return the process exit code.
pub fn dispatch(ctx: &SetupContext<'_>, args: &[String]) -> Result<i32> {
    let mut args = args;

    loop {
        if args.is_empty() {
            return Err(SetupError::UserError("no command given".to_string()));
        }

        log::trace!("dispatching {:?}", args);
        match classify(args) {
            Route::Ipv6(rest) => {
                if !ctx.config.ipv6_enabled {
                    log::info!("IPv6 is disabled, skipping `{}`", rest.join(" "));
                    return Ok(exit_codes::SUCCESS);
                }
                args = rest;
            }
            Route::IpAdd => return ip_add(ctx, args),
            Route::Iptables => return iptables(ctx, args),
            Route::NetworkdAdd(path) => return networkd::add_config(ctx, Path::new(path)),
            Route::Passthrough => return Ok(run(ctx.runner, args, Capture::None)?.code),
        }
    }
}

/// Run an `ip ... add` command, treating "File exists" as success.
fn ip_add(ctx: &SetupContext<'_>, args: &[String]) -> Result<i32> {
    let output = run(ctx.runner, args, Capture::Stderr)?;

    if output.stderr_trimmed().ends_with(FILE_EXISTS) {
        return Ok(exit_codes::SUCCESS);
    }
    Ok(output.code)
}

/// Replace every append/insert flag with the check flag.
pub fn check_command(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| match arg.as_str() {
            "-A" | "-I" => "-C".to_string(),
            _ => arg.clone(),
        })
        .collect()
}

/// Add an iptables rule unless an identical rule is already present.
///
/// Any failure of the check, including ones unrelated to the rule being
/// absent, leads to the mutating command being run.
fn iptables(ctx: &SetupContext<'_>, args: &[String]) -> Result<i32> {
    let check = run(ctx.runner, &check_command(args), Capture::None)?;
    if check.success() {
        return Ok(check.code);
    }

    Ok(run(ctx.runner, args, Capture::None)?.code)
}
