//! Exit code constants for dcos-net-setup.
//!
//! Most of the time the process exits with the code of the wrapped command.
//! These are the codes the wrapper produces on its own:
//! - 0: Success, or an accepted no-op
//! - 1: User error (nothing left to run)
//! - 2: Usage error reported by the argument parser
//! - 3: Filesystem failure while syncing networkd configuration
//! - 127: The wrapped command could not be started

/// Successful execution or tolerated failure.
pub const SUCCESS: i32 = 0;

/// User error: the invocation names nothing to run.
pub const USER_ERROR: i32 = 1;

/// Filesystem failure: creating, reading or replacing networkd config files.
pub const IO_FAILURE: i32 = 3;

/// The child process could not be spawned (missing binary, permissions).
pub const SPAWN_FAILURE: i32 = 127;

/// Offset added to a signal number when a child is killed by that signal.
pub const SIGNAL_BASE: i32 = 128;

/// Clamp an exit code into the byte range the OS reports.
pub fn to_process_code(code: i32) -> u8 {
    (code & 0xff) as u8
}
