//! # cbuild
//!
//! Drives the configure, compile, test and run steps of a CMake project by
//! shelling out to `cmake`, `make`/`mingw32-make`, `ctest` and the produced
//! executable.
//!
//! Every step runs synchronously. The first command that exits non-zero
//! aborts the run with [`BuildError::StepFailed`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use cbuild::{Action, BinLayout, Orchestrator, Platform, ProjectPaths, ShellRunner, Toolchain};
//!
//! let paths = ProjectPaths::new(".", BinLayout::Root)?;
//! let toolchain = Toolchain::new(Platform::host(), "src");
//!
//! Orchestrator::new(paths, toolchain, ShellRunner)
//!     .build_type("Debug")
//!     .run_action(Action::All)?;
//! # Ok::<(), cbuild::BuildError>(())
//! ```

mod cmake;
pub mod cmd;
pub mod error;
pub mod menu;
pub mod orchestrator;
pub mod paths;
pub mod platform;

pub use cmd::{Cmd, DryRunRunner, Runner, ShellRunner};
pub use error::{BuildError, Result};
pub use menu::Action;
pub use orchestrator::{Orchestrator, ResetPolicy, Step};
pub use paths::{BinLayout, ProjectPaths};
pub use platform::{Platform, Toolchain};
