use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cbuild::{Action, BinLayout, Platform, ResetPolicy};

#[derive(Parser, Debug)]
#[command(name = "cbuild", version, about = "Configure, compile, test and run a CMake project")]
pub struct Cli {
    /// Project root holding the top-level CMakeLists.txt
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Run this action instead of showing the menu
    #[arg(long, value_enum)]
    pub action: Option<Action>,

    /// Command set to use
    #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
    pub platform: PlatformArg,

    /// When to wipe the build directory
    #[arg(long, value_enum, default_value_t = ResetPolicy::OnConfigure)]
    pub reset: ResetPolicy,

    /// Location of the binary output directory
    #[arg(long, value_enum, default_value_t = BinLayout::Root)]
    pub bin_layout: BinLayout,

    /// Name of the executable produced by the build
    #[arg(long, default_value = "src")]
    pub exe: String,

    /// Value for CMAKE_BUILD_TYPE
    #[arg(long, default_value = "Debug")]
    pub build_type: String,

    /// Extra cmake definition, e.g. -D ENABLE_X=ON
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub defines: Vec<String>,

    /// Configure preset from CMakePresets.json
    #[arg(long)]
    pub preset: Option<String>,

    /// Leave ctest out of the full run
    #[arg(long)]
    pub no_tests: bool,

    /// Print commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Auto,
    Unix,
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Auto => Platform::host(),
            PlatformArg::Unix => Platform::Unix,
            PlatformArg::Windows => Platform::Windows,
        }
    }
}
