use std::{
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
    sync::mpsc::{self, Receiver},
    thread,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::cmake::{CMakePresets, PresetError};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cmake not found in PATH: {0}")]
    CMakeNotFound(#[source] which::Error),

    #[error(transparent)]
    Presets(#[from] PresetError),

    #[error("preset `{name}` not found")]
    PresetNotFound { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cmake configure failed with status: {status}")]
    ConfigureFailed { status: ExitStatus },

    #[error("cmake build failed with status: {status}")]
    BuildFailed { status: ExitStatus },
}

pub type BuildResult = Result<BuildOutput, BuildError>;

/// Where a finished build placed its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    output_dir: PathBuf,
}

impl BuildOutput {
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Platform file name of a shared library built into the output
    /// directory, e.g. `libarraymath.so` on Linux.
    pub fn library_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(libloading::library_filename(name))
    }
}

/// Configures and builds a native CMake project, by default the bundled
/// `arraymath` library.
#[derive(Debug, Clone)]
pub struct NativeBuild {
    args: Vec<String>,
    source_dir: PathBuf,
    binary_dir: PathBuf,
    output_dir: PathBuf,
    preset: Option<String>,
    defines: Vec<String>,
}

impl Default for NativeBuild {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeBuild {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            source_dir: PathBuf::from(crate::BUNDLED_NATIVE_DIR),
            binary_dir: PathBuf::from("build"),
            output_dir: PathBuf::from("build"),
            preset: None,
            defines: Vec::new(),
        }
    }

    pub fn add_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>,
    {
        self.args.push(arg.into());
        self
    }

    pub fn set_source_dir<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.source_dir = path.into();
        self
    }

    pub fn set_binary_dir<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.binary_dir = path.into();
        self
    }

    pub fn set_output_dir<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.output_dir = path.into();
        self
    }

    pub fn set_preset<T>(mut self, preset: T) -> Self
    where
        T: Into<String>,
    {
        self.preset = Some(preset.into());
        self
    }

    /// Adds a cache entry, written as `NAME=VALUE` or `NAME:TYPE=VALUE`.
    pub fn add_define<T>(mut self, define: T) -> Self
    where
        T: Into<String>,
    {
        self.defines.push(format!("-D{}", define.into()));
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build(&self) -> BuildResult {
        self.execute()
    }

    pub fn spawn(self) -> Receiver<BuildResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(self.execute());
        });

        rx
    }

    /// Arguments passed to the configure step, excluding `-S`/`-B` and the
    /// output directory overrides.
    fn configure_args(&self) -> Result<Vec<String>, BuildError> {
        let mut args = Vec::new();

        if let Some(preset_name) = &self.preset {
            let presets = CMakePresets::new(&self.source_dir)?;
            let Some(preset) = presets.get_preset(preset_name) else {
                return Err(BuildError::PresetNotFound {
                    name: preset_name.clone(),
                });
            };
            args.push(format!("--preset={}", preset.get_name()));
        }

        args.extend(self.defines.iter().cloned());
        args.extend(self.args.iter().cloned());
        Ok(args)
    }

    fn execute(&self) -> BuildResult {
        let configure_args = self.configure_args()?;
        let cmake = which::which("cmake").map_err(BuildError::CMakeNotFound)?;

        // binary and output directories must exist before cmake runs
        ensure_dir(&self.binary_dir)?;
        ensure_dir(&self.output_dir)?;
        let output_dir = self.output_dir.canonicalize()?;

        let output_dir_args = [
            "CMAKE_RUNTIME_OUTPUT_DIRECTORY",
            "CMAKE_LIBRARY_OUTPUT_DIRECTORY",
            "CMAKE_ARCHIVE_OUTPUT_DIRECTORY",
        ]
        .map(|var| format!("-D{}={}", var, output_dir.display()));

        info!(
            source = %self.source_dir.display(),
            binary = %self.binary_dir.display(),
            "configuring native library"
        );
        debug!(args = ?configure_args, "cmake configure arguments");

        let status = Command::new(&cmake)
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.binary_dir)
            .args(&configure_args)
            .args(&output_dir_args)
            .status()?;

        if !status.success() {
            return Err(BuildError::ConfigureFailed { status });
        }

        info!(binary = %self.binary_dir.display(), "building native library");
        let status = Command::new(&cmake)
            .arg("--build")
            .arg(&self.binary_dir)
            .status()?;

        if !status.success() {
            return Err(BuildError::BuildFailed { status });
        }

        info!(output = %output_dir.display(), "native library built");
        Ok(BuildOutput { output_dir })
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
