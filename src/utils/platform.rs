//! Platform detection utilities.

/// Supported platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Option<Self> {
        #[cfg(target_os = "macos")]
        {
            Some(Platform::MacOS)
        }
        #[cfg(target_os = "linux")]
        {
            Some(Platform::Linux)
        }
        #[cfg(target_os = "windows")]
        {
            Some(Platform::Windows)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Get the platform name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
        }
    }

    /// Command used to look up executables on `PATH`.
    pub fn lookup_command(&self) -> &'static str {
        match self {
            Platform::Windows => "where",
            Platform::MacOS | Platform::Linux => "which",
        }
    }

    /// File extension appended to executables, if any.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::MacOS | Platform::Linux => "",
        }
    }
}

/// Get the current platform, if supported.
pub fn current_platform() -> Option<Platform> {
    Platform::current()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_current() {
        let platform = Platform::current();
        #[cfg(target_os = "macos")]
        assert_eq!(platform, Some(Platform::MacOS));
        #[cfg(target_os = "linux")]
        assert_eq!(platform, Some(Platform::Linux));
        #[cfg(target_os = "windows")]
        assert_eq!(platform, Some(Platform::Windows));
    }

    #[test]
    fn test_lookup_command() {
        assert_eq!(Platform::Linux.lookup_command(), "which");
        assert_eq!(Platform::MacOS.lookup_command(), "which");
        assert_eq!(Platform::Windows.lookup_command(), "where");
        assert_eq!(Platform::Windows.exe_suffix(), ".exe");
    }
}
