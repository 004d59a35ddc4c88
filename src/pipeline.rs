use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::go::{ARTIFACT_NAME, BuildOutput, Go};
use crate::locate::find_main_file;
use crate::shim::{ShimSource, copy_shim};

/// Inputs of a build
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the Go sources
    pub working_dir: PathBuf,
    /// Output directory, relative to `working_dir` unless absolute
    pub out_dir: PathBuf,
    /// Go toolchain used to compile
    pub go: Go,
    /// Where to find `wasm_exec.js`
    pub shim: ShimSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            out_dir: PathBuf::from("build"),
            go: Go::default(),
            shim: ShimSource::default(),
        }
    }
}

/// Progress notifications emitted by [`Pipeline::run`]
#[derive(Debug)]
pub enum Event<'a> {
    /// The compiler exited, successfully or not
    BuildOutput(&'a BuildOutput),
    /// The module was written
    Compiled {
        /// File holding `func main()`
        entry: &'a Path,
        /// Path of the module
        artifact: &'a Path,
    },
    /// `wasm_exec.js` was copied
    ShimCopied(&'a Path),
}

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct Report {
    /// File holding `func main()`
    pub entry: PathBuf,
    /// Path of the WebAssembly module
    pub artifact: PathBuf,
    /// Path of the copied `wasm_exec.js`
    pub shim: PathBuf,
    /// Everything the compiler printed
    pub output: BuildOutput,
}

/// Locates the entry point, compiles it to WebAssembly and copies `wasm_exec.js` next to it
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Creates a pipeline from its configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration of this pipeline
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Finds the Go file holding `func main()`
    pub fn locate(&self) -> Result<PathBuf, Error> {
        find_main_file(&self.config.working_dir)
    }

    /// Returns the absolute path of the output directory
    pub fn out_dir(&self) -> Result<PathBuf, Error> {
        let out_dir = self.config.working_dir.join(&self.config.out_dir);

        std::path::absolute(&out_dir).map_err(|source| Error::Io {
            path: out_dir,
            source,
        })
    }

    /// Runs every step, stopping at the first failure.
    ///
    /// Files written before a failure are left in place.
    pub fn run(&self, mut on_event: impl FnMut(Event<'_>)) -> Result<Report, Error> {
        let entry = self.locate()?;

        let out_dir = self.out_dir()?;
        std::fs::create_dir_all(&out_dir).map_err(|source| Error::CreateDir {
            path: out_dir.clone(),
            source,
        })?;

        let artifact = out_dir.join(ARTIFACT_NAME);
        let output = match self.config.go.build(&entry, &artifact) {
            Ok(output) => output,
            Err(e) => {
                if let Error::Build { output, .. } = &e {
                    on_event(Event::BuildOutput(output));
                }
                return Err(e);
            }
        };
        on_event(Event::BuildOutput(&output));
        on_event(Event::Compiled {
            entry: &entry,
            artifact: &artifact,
        });

        let shim = copy_shim(&self.config.shim, &out_dir)?;
        on_event(Event::ShimCopied(&shim));

        Ok(Report {
            entry,
            artifact,
            shim,
            output,
        })
    }
}
