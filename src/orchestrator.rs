use std::fmt;

use clap::ValueEnum;

use crate::cmake;
use crate::cmd::{Cmd, Runner};
use crate::error::{BuildError, Result};
use crate::menu::Action;
use crate::paths::ProjectPaths;
use crate::platform::Toolchain;

const BANNER: &str = "==================================================";

/// When the build directory gets wiped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ResetPolicy {
    /// Wipe it as part of every configure step
    #[default]
    OnConfigure,
    /// Wipe it once before anything runs
    Always,
    /// Never wipe, only create when missing
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Configure,
    Compile,
    Test,
    Run,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configure => "configure",
            Self::Compile => "compile",
            Self::Test => "test",
            Self::Run => "run",
        })
    }
}

/// Drives the configure/compile/test/run steps of one project.
pub struct Orchestrator<R> {
    paths: ProjectPaths,
    toolchain: Toolchain,
    runner: R,
    reset: ResetPolicy,
    with_tests: bool,
    build_type: String,
    defines: Vec<String>,
    preset: Option<String>,
}

impl<R: Runner> Orchestrator<R> {
    pub fn new(paths: ProjectPaths, toolchain: Toolchain, runner: R) -> Self {
        Self {
            paths,
            toolchain,
            runner,
            reset: ResetPolicy::default(),
            with_tests: true,
            build_type: "Debug".to_string(),
            defines: Vec::new(),
            preset: None,
        }
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset = policy;
        self
    }

    /// Whether `Action::All` runs ctest between compile and run.
    pub fn with_tests(mut self, enabled: bool) -> Self {
        self.with_tests = enabled;
        self
    }

    pub fn build_type<T>(mut self, build_type: T) -> Self
    where
        T: Into<String>, {
        self.build_type = build_type.into();
        self
    }

    /// Adds a `-D<define>` to the configure command.
    pub fn add_define<T>(mut self, define: T) -> Self
    where
        T: Into<String>, {
        self.defines.push(format!("-D{}", define.into()));
        self
    }

    pub fn preset<T>(mut self, preset: T) -> Self
    where
        T: Into<String>, {
        self.preset = Some(preset.into());
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// The steps `action` expands to, in execution order.
    pub fn steps_for(&self, action: Action) -> Vec<Step> {
        match action {
            Action::Configure => vec![Step::Configure],
            Action::Compile => vec![Step::Compile],
            Action::Test => vec![Step::Test],
            Action::Run => vec![Step::Run],
            Action::All if self.with_tests => {
                vec![Step::Configure, Step::Compile, Step::Test, Step::Run]
            }
            Action::All => vec![Step::Configure, Step::Compile, Step::Run],
        }
    }

    /// Start-of-run directory bookkeeping for the reset policy.
    pub fn prepare(&mut self) -> Result<()> {
        if self.reset == ResetPolicy::Always {
            self.remove_build_dir()?;
        }
        self.create_build_dir()
    }

    pub fn run_action(&mut self, action: Action) -> Result<()> {
        tracing::info!(%action, root = %self.paths.project_root().display(), "starting");
        self.prepare()?;
        for step in self.steps_for(action) {
            self.run_step(step)?;
        }
        Ok(())
    }

    pub fn run_step(&mut self, step: Step) -> Result<()> {
        tracing::info!(%step, "running step");
        match step {
            Step::Configure => self.configure(),
            Step::Compile => self.compile(),
            Step::Test => self.run_tests(),
            Step::Run => self.run_executable(),
        }
    }

    pub fn configure(&mut self) -> Result<()> {
        // resolve the preset before touching the build dir
        let preset_arg = match &self.preset {
            Some(name) => Some(cmake::preset_arg(self.paths.project_root(), name)?),
            None => None,
        };

        if self.reset == ResetPolicy::OnConfigure {
            self.remove_build_dir()?;
        }
        self.create_build_dir()?;

        let mut cmd = self.toolchain.configure();
        if let Some(arg) = preset_arg {
            cmd = cmd.add_arg(arg);
        }
        let cmd = cmd
            .add_arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type))
            .add_args(self.defines.iter().cloned())
            .set_cwd(self.paths.build_dir());
        self.exec(&cmd)
    }

    pub fn compile(&mut self) -> Result<()> {
        let cmd = self.toolchain.compile().set_cwd(self.paths.build_dir());
        self.exec(&cmd)
    }

    pub fn run_tests(&mut self) -> Result<()> {
        let cmd = self.toolchain.test().set_cwd(self.paths.build_dir());
        self.exec(&cmd)
    }

    pub fn run_executable(&mut self) -> Result<()> {
        let cmd = self.toolchain.executable().set_cwd(self.paths.bin_dir());
        self.exec(&cmd)
    }

    pub fn run_all(&mut self) -> Result<()> {
        self.run_action(Action::All)
    }

    fn exec(&mut self, cmd: &Cmd) -> Result<()> {
        let command = cmd.line();
        println!("\n{BANNER}");
        println!("Running command: {command}");

        let exit_code = match self.runner.run(cmd) {
            Ok(code) => code,
            Err(e) => {
                println!("Command could not be started: {e}");
                println!("{BANNER}\n");
                return Err(e);
            }
        };
        if exit_code != 0 {
            println!("Command failed with return code: {exit_code}");
            println!("{BANNER}\n");
            tracing::error!(%command, exit_code, "step failed");
            return Err(BuildError::StepFailed { command, exit_code });
        }
        Ok(())
    }

    fn remove_build_dir(&self) -> Result<()> {
        let dir = self.paths.build_dir();
        if dir.exists() {
            tracing::debug!(dir = %dir.display(), "removing build directory");
            std::fs::remove_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
        }
        Ok(())
    }

    fn create_build_dir(&self) -> Result<()> {
        let dir = self.paths.build_dir();
        std::fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))
    }
}
