use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Name of the JavaScript support file needed to run Go WebAssembly modules
pub const SHIM_NAME: &str = "wasm_exec.js";

/// Environment variable holding the toolchain base directory
pub const GO_PATH_VAR: &str = "goPath";

/// Where to find `wasm_exec.js`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShimSource {
    /// Exact path of the file
    Explicit(PathBuf),
    /// Toolchain base directory, the file is under `misc/wasm`
    GoRoot(PathBuf),
    /// Toolchain base directory read from `goPath`, or `$HOME/go` if unset
    #[default]
    Environment,
}

impl ShimSource {
    /// Returns the path where `wasm_exec.js` is expected
    pub fn resolve(&self) -> PathBuf {
        match self {
            Self::Explicit(path) => path.clone(),
            Self::GoRoot(root) => shim_path(root),
            Self::Environment => shim_path(&go_root_from_env(
                std::env::var_os(GO_PATH_VAR).as_deref(),
                std::env::var_os("HOME").as_deref(),
            )),
        }
    }
}

fn shim_path(root: &Path) -> PathBuf {
    root.join("misc").join("wasm").join(SHIM_NAME)
}

/// Strips every occurrence of `path` from the value of `goPath`.
///
/// Some setups export the variable as e.g. `pathC:\Go`.
pub fn normalize_go_path(value: &str) -> String {
    value.replace("path", "")
}

fn go_root_from_env(go_path: Option<&OsStr>, home: Option<&OsStr>) -> PathBuf {
    let go_path = go_path
        .map(|value| normalize_go_path(&value.to_string_lossy()))
        .unwrap_or_default();
    if !go_path.is_empty() {
        return PathBuf::from(go_path);
    }

    tracing::debug!("`{GO_PATH_VAR}` is not set, falling back to `$HOME/go`");
    home.map_or_else(PathBuf::new, PathBuf::from).join("go")
}

/// Copies `wasm_exec.js` into `dest_dir` and returns the path of the copy.
///
/// Nothing is written if the source file does not exist,
/// or if it already is the destination.
pub fn copy_shim(source: &ShimSource, dest_dir: &Path) -> Result<PathBuf, Error> {
    let source_path = source.resolve();
    if !source_path.exists() {
        return Err(Error::ShimMissing { path: source_path });
    }

    let dest_path = dest_dir.join(SHIM_NAME);
    if is_same_file(&source_path, &dest_path) {
        tracing::debug!("`{}` is already in place", dest_path.display());
        return Ok(dest_path);
    }

    copy_file(&source_path, &dest_path)?;
    tracing::debug!(
        "Copied `{}` to `{}`",
        source_path.display(),
        dest_path.display()
    );

    Ok(dest_path)
}

/// Returns `true` if both paths name the same existing file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<u64, Error> {
    let mut source = File::open(from).map_err(|source| Error::Io {
        path: from.to_path_buf(),
        source,
    })?;
    let mut destination = File::create(to).map_err(|source| Error::Io {
        path: to.to_path_buf(),
        source,
    })?;

    std::io::copy(&mut source, &mut destination).map_err(|source| Error::Io {
        path: to.to_path_buf(),
        source,
    })
}
