use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PRESETS_FILE: &str = "CMakePresets.json";

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CMake presets: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CMakePreset {
    name: String,
    #[serde(default = "default_hidden")]
    hidden: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "binaryDir")]
    binary_dir: Option<String>,
}

impl CMakePreset {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The unexpanded `binaryDir` template, e.g. `${sourceDir}/build`.
    pub fn binary_dir(&self) -> Option<&str> {
        self.binary_dir.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CMakePresets {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default, rename = "configurePresets")]
    configure_presets: Vec<CMakePreset>,
}

impl CMakePresets {
    /// Reads `CMakePresets.json` from a source directory, or from the file
    /// itself when `path` already names it.
    pub fn new<T>(path: T) -> Result<Self, PresetError>
    where
        T: Into<PathBuf>,
    {
        let path = path.into();

        let path = if path.ends_with(PRESETS_FILE) {
            path
        } else {
            path.join(PRESETS_FILE)
        };

        let content = std::fs::read_to_string(&path).map_err(|source| PresetError::Io {
            path: path.clone(),
            source,
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Looks up a selectable preset. Hidden presets only exist to be
    /// inherited from, so they are never returned.
    pub fn get_preset(&self, name: &str) -> Option<&CMakePreset> {
        self.visible().find(|p| p.name == name)
    }

    pub fn visible(&self) -> impl Iterator<Item = &CMakePreset> {
        self.configure_presets.iter().filter(|p| !p.hidden)
    }
}

fn default_hidden() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_bundled_preset() {
        let presets = CMakePresets::new(crate::BUNDLED_NATIVE_DIR).unwrap();
        let preset = presets
            .get_preset("default")
            .expect("Failed to get preset default");
        assert_eq!(preset.get_name(), "default");
        assert_eq!(preset.binary_dir(), Some("${sourceDir}/build"));
        assert_eq!(presets.version(), Some(3));
    }

    #[test]
    fn accepts_path_to_presets_file() {
        let path = format!("{}/CMakePresets.json", crate::BUNDLED_NATIVE_DIR);
        let presets = CMakePresets::new(path).unwrap();
        assert!(presets.get_preset("debug").is_some());
    }

    #[test]
    fn hidden_presets_are_not_selectable() {
        let presets = CMakePresets::parse(
            r#"{
                "version": 3,
                "configurePresets": [
                    { "name": "base", "hidden": true },
                    { "name": "release", "inherits": "base" }
                ]
            }"#,
        )
        .unwrap();

        assert!(presets.get_preset("base").is_none());
        let names: Vec<_> = presets.visible().map(CMakePreset::get_name).collect();
        assert_eq!(names, ["release"]);
    }

    #[test]
    fn missing_presets_file() {
        let err = CMakePresets::new("definitely/not/here").unwrap_err();
        assert!(matches!(err, PresetError::Io { .. }));
    }

    #[test]
    fn malformed_presets() {
        let err = CMakePresets::parse("{ not json").unwrap_err();
        assert!(matches!(err, PresetError::Json(_)));
    }
}
