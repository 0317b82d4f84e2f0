//! Process introspection for the server's info resources.
//!
//! Everything here is read at call time; nothing is cached.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Toolchain the workspace targets, reported as the runtime version.
pub const RUNTIME_VERSION: &str = concat!("rust ", env!("CARGO_PKG_RUST_VERSION"));

/// Operating system the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Native Linux (not WSL)
    Linux,
    /// macOS
    MacOS,
    /// Native Windows
    Windows,
    /// Windows Subsystem for Linux
    WSL,
    /// Anything else
    Other,
}

impl Platform {
    /// Detect the current platform at runtime.
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") {
            if Self::is_wsl() {
                Platform::WSL
            } else {
                Platform::Linux
            }
        } else if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Check `/proc/version` and the WSL interop entry.
    fn is_wsl() -> bool {
        if let Ok(version) = std::fs::read_to_string("/proc/version") {
            if version.to_lowercase().contains("microsoft") {
                return true;
            }
        }

        std::path::Path::new("/proc/sys/fs/binfmt_misc/WSLInterop").exists()
    }

    /// Lowercase identifier used in JSON documents.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOS => "macos",
            Platform::Windows => "windows",
            Platform::WSL => "wsl",
            Platform::Other => std::env::consts::OS,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Memory figures of the current process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Resident set size
    pub used: u64,
    /// Virtual memory size
    pub total: u64,
    /// Memory held outside the process heap (always 0 for a native binary)
    pub external: u64,
}

impl MemoryUsage {
    /// Read the current figures. Returns zeros where unsupported.
    pub fn current() -> Self {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/self/statm")
                .ok()
                .and_then(|statm| Self::from_statm(&statm, page_size()))
                .unwrap_or_default()
        }

        #[cfg(not(target_os = "linux"))]
        {
            Self::default()
        }
    }

    /// Parse `/proc/self/statm`, whose sizes are counted in pages.
    pub fn from_statm(statm: &str, page_size: u64) -> Option<Self> {
        let mut fields = statm.split_whitespace();
        let size: u64 = fields.next()?.parse().ok()?;
        let resident: u64 = fields.next()?.parse().ok()?;

        Some(Self {
            used: resident * page_size,
            total: size * page_size,
            external: 0,
        })
    }
}

/// System page size in bytes, 4096 if the kernel won't say.
#[cfg(unix)]
pub fn page_size() -> u64 {
    const FALLBACK: u64 = 4096;

    // SAFETY: sysconf only reads a system constant.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as u64
    } else {
        FALLBACK
    }
}

/// Format bytes as megabytes with two decimals, e.g. `12.34 MB`.
pub fn format_megabytes(bytes: u64) -> String {
    let mb = bytes as f64 / 1024.0 / 1024.0;
    format!("{:.2} MB", (mb * 100.0).round() / 100.0)
}

/// Format a duration as `Hh Mm Ss`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Time elapsed since the server started.
#[derive(Debug, Clone, Copy)]
pub struct Uptime {
    started: Instant,
}

impl Uptime {
    /// Start counting now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed seconds with sub-second precision.
    pub fn seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::start()
    }
}

/// Local timezone: `TZ` when set, otherwise the current UTC offset.
pub fn local_timezone() -> String {
    std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| chrono::Local::now().offset().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detect() {
        let platform = Platform::detect();

        if cfg!(target_os = "linux") {
            assert!(matches!(platform, Platform::Linux | Platform::WSL));
        } else if cfg!(target_os = "macos") {
            assert_eq!(platform, Platform::MacOS);
        }
    }

    #[test]
    fn test_platform_id() {
        assert_eq!(Platform::Linux.id(), "linux");
        assert_eq!(Platform::MacOS.id(), "macos");
        assert_eq!(Platform::Windows.id(), "windows");
        assert_eq!(Platform::WSL.id(), "wsl");
        assert_eq!(format!("{}", Platform::Linux), "linux");
    }

    #[test]
    fn test_from_statm() {
        let usage = MemoryUsage::from_statm("2048 512 100 10 0 300 0", 4096).unwrap();
        assert_eq!(usage.total, 2048 * 4096);
        assert_eq!(usage.used, 512 * 4096);
        assert_eq!(usage.external, 0);
        assert!(MemoryUsage::from_statm("garbage", 4096).is_none());
        assert!(MemoryUsage::from_statm("", 4096).is_none());
    }

    #[test]
    fn test_from_statm_scales_by_page_size() {
        // 16 KiB pages, as on Apple Silicon and some aarch64 kernels
        let usage = MemoryUsage::from_statm("100 25 0 0 0 0 0", 16384).unwrap();
        assert_eq!(usage.total, 100 * 16384);
        assert_eq!(usage.used, 25 * 16384);
    }

    #[cfg(unix)]
    #[test]
    fn test_page_size_is_power_of_two() {
        let size = page_size();
        assert!(size >= 4096);
        assert!(size.is_power_of_two());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_current_memory_on_linux() {
        let usage = MemoryUsage::current();
        assert!(usage.used > 0);
        assert!(usage.total >= usage.used);
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_megabytes(1536 * 1024), "1.50 MB");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h 2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(59)), "0h 0m 59s");
    }

    #[test]
    fn test_uptime_is_monotonic() {
        let uptime = Uptime::start();
        let first = uptime.seconds();
        let second = uptime.seconds();
        assert!(second >= first);
    }

    #[test]
    fn test_runtime_version() {
        assert!(RUNTIME_VERSION.starts_with("rust "));
    }
}
