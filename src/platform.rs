use std::fmt;

use crate::cmd::Cmd;

/// Which command set to drive the build with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    /// MinGW toolchain: `MinGW Makefiles` generator, `mingw32-make`, `.exe` binaries.
    Windows,
}

impl Platform {
    pub fn host() -> Self {
        Self::from_is_windows(cfg!(windows))
    }

    pub fn from_is_windows(is_windows: bool) -> Self {
        if is_windows { Self::Windows } else { Self::Unix }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => f.write_str("unix"),
            Self::Windows => f.write_str("windows"),
        }
    }
}

/// The external commands a build is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    platform: Platform,
    exe_name: String,
}

impl Toolchain {
    pub fn new<T>(platform: Platform, exe_name: T) -> Self
    where
        T: Into<String>, {
        Self {
            platform,
            exe_name: exe_name.into(),
        }
    }

    /// `cmake ..` plus generator for the platform. Runs from inside the build dir.
    pub fn configure(&self) -> Cmd {
        let cmd = Cmd::new("cmake").add_arg("..");
        match self.platform {
            Platform::Unix => cmd,
            Platform::Windows => cmd.add_arg("-G").add_arg("\"MinGW Makefiles\""),
        }
    }

    pub fn build_tool(&self) -> &'static str {
        match self.platform {
            Platform::Unix => "make",
            Platform::Windows => "mingw32-make",
        }
    }

    pub fn compile(&self) -> Cmd {
        Cmd::new(self.build_tool())
    }

    pub fn test(&self) -> Cmd {
        Cmd::new("ctest")
            .add_arg("--output-on-failure")
            .add_arg("--verbose")
    }

    /// The produced executable, relative to the binary output directory.
    pub fn executable(&self) -> Cmd {
        match self.platform {
            Platform::Unix => Cmd::new(format!("./{}", self.exe_name)),
            Platform::Windows => Cmd::new(format!("{}.exe", self.exe_name)),
        }
    }

    /// Tools from this command set that cannot be found on `PATH`.
    pub fn missing_tools(&self) -> Vec<&'static str> {
        ["cmake", self.build_tool(), "ctest"]
            .into_iter()
            .filter(|tool| which::which(tool).is_err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_flag_selects_mingw_set() {
        let tc = Toolchain::new(Platform::from_is_windows(true), "c_sandbox");
        assert_eq!(
            tc.configure().line(),
            "cmake .. -G \"MinGW Makefiles\""
        );
        assert_eq!(tc.compile().line(), "mingw32-make");
        assert_eq!(tc.executable().line(), "c_sandbox.exe");
    }

    #[test]
    fn other_hosts_select_unix_set() {
        let tc = Toolchain::new(Platform::from_is_windows(false), "src");
        assert_eq!(tc.configure().line(), "cmake ..");
        assert_eq!(tc.compile().line(), "make");
        assert_eq!(tc.executable().line(), "./src");
    }

    #[test]
    fn test_command_is_platform_independent() {
        for platform in [Platform::Unix, Platform::Windows] {
            let tc = Toolchain::new(platform, "src");
            assert_eq!(tc.test().line(), "ctest --output-on-failure --verbose");
        }
    }

    #[test]
    fn host_matches_cfg() {
        assert_eq!(Platform::host() == Platform::Windows, cfg!(windows));
    }
}
