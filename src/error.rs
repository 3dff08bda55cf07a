use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    /// A shelled-out command exited non-zero.
    #[error("command `{command}` failed with exit code {exit_code}")]
    StepFailed { command: String, exit_code: i32 },

    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("filesystem operation on {} failed", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal I/O failed")]
    Terminal(#[source] std::io::Error),

    #[error("cmake preset error: {0}")]
    Preset(String),

    #[error("input closed before a valid choice was entered")]
    InputClosed,
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code of the failed child, if this is a step failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::StepFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}
