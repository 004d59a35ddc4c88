use std::path::PathBuf;

use clap::ColorChoice;

use go_wasm_build::{Config, Go, ShimSource};

/// Type of information to print on stdout
#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Print {
    /// Prints the Go file holding `func main()`
    EntryPoint,
    /// Prints the path where wasm_exec.js is expected
    WasmExecPath,
}

#[derive(clap::Parser)]
#[command(version, author, about, long_about)]
pub struct Args {
    /// Directory holding the Go sources
    #[clap(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Build output directory, relative to the sources directory
    #[clap(short, long, value_name = "DIR", default_value = "build")]
    pub out_dir: PathBuf,

    /// Go toolchain used to compile
    #[clap(long, value_name = "PROGRAM", env = "GO", default_value = "go")]
    pub go: String,

    /// Toolchain base directory containing misc/wasm/wasm_exec.js [default: $goPath or $HOME/go]
    #[clap(long, value_name = "DIR")]
    pub go_root: Option<PathBuf>,

    /// Path of wasm_exec.js, takes precedence over --go-root
    #[clap(long, value_name = "FILE")]
    pub wasm_exec: Option<PathBuf>,

    /// Print information on stdout instead of building
    #[clap(long, value_name = "INFORMATION")]
    pub print: Option<Print>,

    /// Color preferences for program output
    #[clap(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}

impl Args {
    /// Returns where to look for wasm_exec.js
    pub fn shim_source(&self) -> ShimSource {
        match (&self.wasm_exec, &self.go_root) {
            (Some(path), _) => ShimSource::Explicit(path.clone()),
            (None, Some(root)) => ShimSource::GoRoot(root.clone()),
            (None, None) => ShimSource::Environment,
        }
    }

    /// Returns the configuration of the build
    pub fn config(&self) -> Config {
        Config {
            working_dir: self.directory.clone(),
            out_dir: self.out_dir.clone(),
            go: Go::new(&self.go),
            shim: self.shim_source(),
        }
    }
}
