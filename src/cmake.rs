use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BuildError, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct CMakePreset {
    name: String,
    #[serde(default)]
    hidden: bool,
}

impl CMakePreset {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

/// The configure presets of a project's `CMakePresets.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CMakePresets {
    #[serde(rename = "configurePresets", default)]
    configure_presets: Vec<CMakePreset>,
}

impl CMakePresets {
    /// Reads `CMakePresets.json` from `path`, which may be the file itself or
    /// the directory holding it.
    pub(crate) fn load<T>(path: T) -> Result<Self>
    where
        T: Into<PathBuf>, {
        let path = path.into();
        let path = if path.ends_with("CMakePresets.json") {
            path
        } else {
            path.join("CMakePresets.json")
        };

        let content = std::fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| BuildError::Preset(format!("{}: {e}", path.display())))
    }

    pub(crate) fn get_preset(&self, name: &str) -> Option<&CMakePreset> {
        self.configure_presets.iter().find(|p| p.name == name)
    }

    /// Looks up a preset that can be passed to `cmake --preset`.
    /// Hidden presets only exist to be inherited from.
    pub(crate) fn usable(&self, name: &str) -> Result<&CMakePreset> {
        match self.get_preset(name) {
            Some(preset) if preset.hidden => Err(BuildError::Preset(format!(
                "preset {name} is hidden and cannot be configured directly"
            ))),
            Some(preset) => Ok(preset),
            None => Err(BuildError::Preset(format!("preset {name} not found"))),
        }
    }
}

/// Returns the `--preset=` argument for `name` after checking it against the
/// project's presets file.
pub(crate) fn preset_arg(project_root: &Path, name: &str) -> Result<String> {
    let presets = CMakePresets::load(project_root)?;
    let preset = presets.usable(name)?;
    Ok(format!("--preset={}", preset.name()))
}
