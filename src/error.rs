use std::path::PathBuf;
use std::process::ExitStatus;

use crate::go::BuildOutput;

/// Coarse category of an [`Error`], for callers that only need to know which step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The entry point could not be located
    Discovery,
    /// The Go toolchain failed or could not be started
    Build,
    /// `wasm_exec.js` does not exist where it was expected
    SupportFileMissing,
    /// Creating the output directory or copying `wasm_exec.js` failed
    Io,
}

/// Errors returned by each step of the build
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source directory could not be listed
    #[error("Failed to read directory `{}`", path.display())]
    ReadDir {
        /// Directory that was scanned
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// None of the `.go` files of the directory contains `func main()`
    #[error("no main Go file found in `{}`", path.display())]
    NoMainFile {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// The Go toolchain could not be executed
    #[error("Failed to execute `{program}`")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The Go toolchain exited with a failure status
    #[error("`go build` of `{}` failed ({status})", entry.display())]
    Build {
        /// Entry point given to the compiler
        entry: PathBuf,
        /// Exit status of the compiler
        status: ExitStatus,
        /// Everything the compiler printed
        output: BuildOutput,
    },

    /// `wasm_exec.js` was not found
    #[error("wasm_exec.js not found at `{}`", path.display())]
    ShimMissing {
        /// Path where the file was expected
        path: PathBuf,
    },

    /// The output directory could not be created
    #[error("Failed to create output directory `{}`", path.display())]
    CreateDir {
        /// Directory that was created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading, creating or copying a file failed
    #[error("I/O error on `{}`", path.display())]
    Io {
        /// File involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadDir { .. } | Self::NoMainFile { .. } => ErrorKind::Discovery,
            Self::Spawn { .. } | Self::Build { .. } => ErrorKind::Build,
            Self::ShimMissing { .. } => ErrorKind::SupportFileMissing,
            Self::CreateDir { .. } | Self::Io { .. } => ErrorKind::Io,
        }
    }
}
