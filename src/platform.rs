//! Platform identification.
//!
//! The networkd workaround only applies to CoreOS hosts, which are recognised
//! by their kernel release string (e.g. `4.14.96-coreos-r1`).

/// Operating system name and kernel release of the running host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Kernel name as reported by `uname -s` (e.g. `Linux`).
    pub system: String,
    /// Kernel release as reported by `uname -r`.
    pub release: String,
}

impl Platform {
    pub fn new(system: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            release: release.into(),
        }
    }

    /// Identify the running host via `uname(2)`.
    ///
    /// If the call fails the platform is reported with an empty release,
    /// which never matches CoreOS.
    #[cfg(unix)]
    pub fn current() -> Self {
        match nix::sys::utsname::uname() {
            Ok(uts) => Self::new(
                uts.sysname().to_string_lossy(),
                uts.release().to_string_lossy(),
            ),
            Err(e) => {
                log::warn!("uname failed: {}", e);
                Self::new(std::env::consts::OS, "")
            }
        }
    }

    #[cfg(not(unix))]
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, "")
    }

    /// Returns true on Linux hosts whose kernel release mentions `coreos`.
    pub fn is_coreos(&self) -> bool {
        self.system == "Linux" && self.release.contains("coreos")
    }
}
