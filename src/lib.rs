//! Builds the Go program of a directory to WebAssembly for the browser.
//!
//! The build is made of three steps:
//! 1. find the `.go` file holding `func main()` ([`find_main_file`]),
//! 2. run `go build` with `GOOS=js GOARCH=wasm` ([`Go::build`]),
//! 3. copy `wasm_exec.js` from the toolchain next to the module ([`copy_shim`]).
//!
//! [`Pipeline`] chains them and reports failures as a typed [`Error`].

mod error;
mod go;
mod locate;
mod pipeline;
mod shim;

pub use crate::error::{Error, ErrorKind};
pub use crate::go::{ARTIFACT_NAME, BuildOutput, Go, TARGET_ARCH, TARGET_OS};
pub use crate::locate::{ENTRY_POINT_MARKER, SOURCE_SUFFIX, find_main_file};
pub use crate::pipeline::{Config, Event, Pipeline, Report};
pub use crate::shim::{GO_PATH_VAR, SHIM_NAME, ShimSource, copy_shim, normalize_go_path};
