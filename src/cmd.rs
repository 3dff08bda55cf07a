use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{BuildError, Result};

/// A single shell command plus the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl Cmd {
    pub fn new<T>(program: T) -> Self
    where
        T: Into<String>, {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn add_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>, {
        self.args.push(arg.into());
        self
    }

    pub fn add_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>, {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn set_cwd<T>(mut self, cwd: T) -> Self
    where
        T: Into<PathBuf>, {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// The command as handed to the shell.
    pub fn line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Executes commands and reports their exit code.
///
/// An `Err` means the command never ran; a command that ran and failed
/// comes back as `Ok` with its non-zero code.
pub trait Runner {
    fn run(&mut self, cmd: &Cmd) -> Result<i32>;
}

/// Runs commands through the host shell, inheriting stdio and environment.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl Runner for ShellRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<i32> {
        let line = cmd.line();

        let mut command = shell_command(&line);
        if let Some(cwd) = cmd.cwd() {
            if !cwd.is_dir() {
                let missing = std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "working directory does not exist",
                );
                return Err(BuildError::io(cwd, missing));
            }
            command.current_dir(cwd);
        }

        tracing::debug!(command = %line, cwd = ?cmd.cwd(), "spawning");
        let status = command.status().map_err(|source| BuildError::Spawn {
            command: line.clone(),
            source,
        })?;

        // killed by a signal
        Ok(status.code().unwrap_or(-1))
    }
}

// cmd.exe does its own quote parsing, so the line must reach it verbatim.
#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut command = Command::new("cmd");
    command.arg("/C").raw_arg(line);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

/// Prints commands instead of running them. Every command "succeeds".
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl Runner for DryRunRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<i32> {
        match cmd.cwd() {
            Some(cwd) => println!("[dry-run] (cd {} && {})", cwd.display(), cmd.line()),
            None => println!("[dry-run] {}", cmd.line()),
        }
        Ok(0)
    }
}
