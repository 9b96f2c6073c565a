//! CLI argument parsing for dcos-net-setup.
//!
//! The wrapper takes a command line to run rather than options of its own,
//! so clap only collects the raw arguments. Help and version flags are
//! disabled to let `--help` and friends reach the wrapped command, and an
//! escape is inserted ahead of the user's arguments so a leading `--` is
//! passed on as well.

use clap::Parser;
use std::ffi::OsString;

/// Idempotent pre-start wrapper for network setup commands.
///
/// Intended for `ExecStartPre=` lines, e.g.
/// `dcos-net-setup ip link add spartan type dummy` or
/// `dcos-net-setup iptables --wait -A FORWARD -j ACCEPT`.
#[derive(Parser, Debug)]
#[command(name = "dcos-net-setup")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Command to run, optionally prefixed with `--ipv6`.
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse_from(escaped(std::env::args_os()))
    }
}

/// Insert `--` after the program name so clap takes every following
/// argument literally.
fn escaped<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    args.next()
        .into_iter()
        .chain(std::iter::once(OsString::from("--")))
        .chain(args)
        .collect()
}
