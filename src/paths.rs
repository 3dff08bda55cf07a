use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{BuildError, Result};

/// Where the produced executable lands relative to the project root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BinLayout {
    /// `<root>/bin`
    #[default]
    Root,
    /// `<root>/../bin`
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    project_root: PathBuf,
    build_dir: PathBuf,
    bin_dir: PathBuf,
}

impl ProjectPaths {
    /// Resolves the layout under `root`. Relative roots are taken from the
    /// current directory.
    pub fn new<T>(root: T, layout: BinLayout) -> Result<Self>
    where
        T: Into<PathBuf>, {
        let root = root.into();
        let project_root = if root.is_absolute() {
            root
        } else {
            let cwd = std::env::current_dir().map_err(|e| BuildError::io(&root, e))?;
            cwd.join(root)
        };

        let build_dir = project_root.join("build");
        let bin_dir = match layout {
            BinLayout::Root => project_root.join("bin"),
            BinLayout::Parent => project_root.join("..").join("bin"),
        };

        Ok(Self {
            project_root,
            build_dir,
            bin_dir,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }
}
