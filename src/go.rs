use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Error;

/// Value of `GOOS` used for every build
pub const TARGET_OS: &str = "js";

/// Value of `GOARCH` used for every build
pub const TARGET_ARCH: &str = "wasm";

/// Name of the WebAssembly module produced in the output directory
pub const ARTIFACT_NAME: &str = "output.wasm";

/// Everything the compiler printed, stdout followed by stderr.
///
/// The streams are captured separately, so lines written to both are not interleaved
/// in the order the compiler wrote them. `go build` reports almost everything on stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput(Vec<u8>);

impl BuildOutput {
    fn from_streams(mut stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        stdout.extend_from_slice(&stderr);
        Self(stdout)
    }

    /// Raw bytes of the output
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` if the compiler printed nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for BuildOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Wrapper around the `go` command
#[derive(Debug, Clone)]
pub struct Go {
    program: OsString,
}

impl Default for Go {
    fn default() -> Self {
        Self::new(std::env::var_os("GO").unwrap_or_else(|| "go".into()))
    }
}

impl Go {
    /// Uses `program` as the Go toolchain
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, working_dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .current_dir(working_dir)
            .env("GOOS", TARGET_OS)
            .env("GOARCH", TARGET_ARCH);

        command
    }

    /// Compiles `entry` into `output` for `js/wasm`.
    ///
    /// The compiler runs from the directory of `entry` and blocks until it exits.
    /// `output` should be absolute since it is interpreted from that directory.
    pub fn build(&self, entry: &Path, output: &Path) -> Result<BuildOutput, Error> {
        let (working_dir, file_name) = split_entry(entry);

        tracing::debug!(
            "Running `{} build -o {} {}` in `{}`",
            self.program.to_string_lossy(),
            output.display(),
            file_name.display(),
            working_dir.display()
        );

        let result = self
            .command(&working_dir)
            .arg("build")
            .arg("-o")
            .arg(output)
            .arg(&file_name)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        let output = BuildOutput::from_streams(result.stdout, result.stderr);
        if !result.status.success() {
            return Err(Error::Build {
                entry: entry.to_path_buf(),
                status: result.status,
                output,
            });
        }

        Ok(output)
    }
}

fn split_entry(entry: &Path) -> (PathBuf, PathBuf) {
    let working_dir = entry
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let file_name = entry
        .file_name()
        .map_or_else(|| entry.to_path_buf(), PathBuf::from);

    (working_dir, file_name)
}
