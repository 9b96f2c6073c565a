//! networkd configuration sync for CoreOS hosts.
//!
//! When systemd-networkd is enabled on CoreOS it wipes addresses from
//! interfaces it considers its own, including the ones DC/OS networking
//! creates. Dropping a `.network` file that marks those interfaces as
//! unmanaged into `/etc/systemd/network` and restarting networkd prevents
//! that. Elsewhere this is a no-op.
//!
//! The sync walks `check-platform → check-unit-exists → sync-file →
//! check-active → check-staleness → {skip | restart}`, and any stage may
//! end it early.

pub mod timestamp;


use crate::context::SetupContext;
use crate::error::{Result, SetupError};
use crate::exec::{Capture, run};
use crate::exit_codes;
use crate::fs::{ensure_dir, modified_at, sync_file};
use std::path::{Path, PathBuf};

/// Unit name of the network daemon.
pub const NETWORKD_UNIT: &str = "systemd-networkd.service";

/// Build a `systemctl` command line.
fn systemctl(args: &[&str]) -> Vec<String> {
    std::iter::once("systemctl")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}

/// Install `src` as networkd configuration and restart networkd if needed.
///
/// Returns the exit code for the whole invocation.
pub fn add_config(ctx: &SetupContext<'_>, src: &Path) -> Result<i32> {
    if !ctx.platform.is_coreos() {
        log::debug!(
            "skipping networkd config on {} {}",
            ctx.platform.system,
            ctx.platform.release
        );
        return Ok(exit_codes::SUCCESS);
    }

    let listed = run(
        ctx.runner,
        &systemctl(&["list-unit-files", NETWORKD_UNIT]),
        Capture::Stdout,
    )?;
    if !listed.success() {
        return Ok(listed.code);
    }
    if !listed.stdout_contains(NETWORKD_UNIT.as_bytes()) {
        log::info!("{} is not installed", NETWORKD_UNIT);
        return Ok(listed.code);
    }

    let dst = install_config(src, &ctx.config.networkd_dir)?;

    let active = run(
        ctx.runner,
        &systemctl(&["is-active", NETWORKD_UNIT]),
        Capture::Stdout,
    )?;
    if !active.success() {
        log::info!("{} is not active, not restarting", NETWORKD_UNIT);
        return Ok(exit_codes::SUCCESS);
    }

    if config_in_effect(ctx, &dst)? {
        log::info!("{} started after {} changed", NETWORKD_UNIT, dst.display());
        return Ok(exit_codes::SUCCESS);
    }

    let restarted = run(
        ctx.runner,
        &systemctl(&["restart", NETWORKD_UNIT]),
        Capture::None,
    )?;
    Ok(restarted.code)
}

/// Copy `src` into `dir` under its own file name, skipping identical files.
///
/// Returns the destination path.
fn install_config(src: &Path, dir: &Path) -> Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| {
        SetupError::UserError(format!("'{}' does not name a file", src.display()))
    })?;
    let dst = dir.join(name);

    ensure_dir(dir)?;
    if sync_file(src, &dst)? {
        log::info!("copied {} to {}", src.display(), dst.display());
    } else {
        log::debug!("{} is up to date", dst.display());
    }

    Ok(dst)
}

/// Returns true if networkd entered the active state after `dst` last changed.
///
/// A failed `systemctl show` or an unparsable timestamp counts as stale, so
/// the caller restarts.
fn config_in_effect(ctx: &SetupContext<'_>, dst: &Path) -> Result<bool> {
    let mtime = modified_at(dst)?;

    let shown = run(
        ctx.runner,
        &systemctl(&[
            "show",
            "--value",
            "--property",
            "ActiveEnterTimestamp",
            NETWORKD_UNIT,
        ]),
        Capture::Stdout,
    )?;
    if !shown.success() {
        return Ok(false);
    }

    let value = shown.stdout_text();
    match timestamp::parse_active_enter(&value) {
        Ok(started) => Ok(started > mtime),
        Err(e) => {
            log::warn!("Unexpected ActiveEnterTimestamp value: \"{}\" ({})", value, e);
            Ok(false)
        }
    }
}
