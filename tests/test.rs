#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::OutputAssertExt;

use predicates::prelude::*;

use tempfile::TempDir;

const SHIM: &[u8] = b"\"use strict\";\n(() => { globalThis.Go = class {}; })();\n\0\xff";

/// Stands in for `go build`: prints the target it was given
/// and writes a fake module to the `-o` path.
const FAKE_GO: &str = r#"#!/bin/sh
echo "building for $GOOS/$GOARCH"
out=""
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then
        shift
        out="$1"
    fi
    src="$1"
    shift
done
printf '\0asm %s' "$src" > "$out"
"#;

const UNTERMINATED_GO: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then
        shift
        out="$1"
    fi
    shift
done
printf '\0asm' > "$out"
printf 'go: downloading nothing' >&2
"#;

const FAILING_GO: &str = r#"#!/bin/sh
echo "./main.go:3:1: syntax error: unexpected }" >&2
exit 1
"#;

struct Project {
    sources: TempDir,
    toolchain: TempDir,
}

impl Project {
    fn new(go_program: &str) -> Self {
        let sources = TempDir::new().unwrap();
        let toolchain = TempDir::new().unwrap();

        let go = toolchain.path().join("bin").join("go");
        fs::create_dir_all(go.parent().unwrap()).unwrap();
        fs::write(&go, go_program).unwrap();
        fs::set_permissions(&go, fs::Permissions::from_mode(0o755)).unwrap();

        Self { sources, toolchain }
    }

    fn with_shim(self) -> Self {
        let wasm = self.toolchain.path().join("misc").join("wasm");
        fs::create_dir_all(&wasm).unwrap();
        fs::write(wasm.join("wasm_exec.js"), SHIM).unwrap();
        self
    }

    fn source(self, name: &str, content: &str) -> Self {
        fs::write(self.sources.path().join(name), content).unwrap();
        self
    }

    fn build_dir(&self) -> PathBuf {
        self.sources.path().join("build")
    }

    /// Runs the binary from the sources directory, the toolchain being found through `goPath`
    fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_go-wasm-build"));
        command
            .current_dir(self.sources.path())
            .env("goPath", format!("path{}", self.toolchain.path().display()))
            .env("HOME", self.sources.path())
            .env_remove("RUST_LOG")
            .arg("--color=never")
            .arg("--go")
            .arg(self.go());

        command
    }

    fn go(&self) -> PathBuf {
        self.toolchain.path().join("bin").join("go")
    }
}

fn read(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap()
}

/// Checks that a directory with a single main package is built and gets its `wasm_exec.js`.
#[test]
fn build_main_package() {
    let project = Project::new(FAKE_GO)
        .with_shim()
        .source("app.go", "package main\n\nfunc main() {}\n")
        .source("util.go", "package main\n\nfunc helper() {}\n");

    project
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("building for js/wasm"))
        .stdout(predicate::str::contains("Compiled"))
        .stdout(predicate::str::contains("output.wasm"));

    assert_eq!(
        read(&project.build_dir().join("output.wasm")),
        b"\0asm app.go"
    );
    assert_eq!(read(&project.build_dir().join("wasm_exec.js")), SHIM);
}

/// Checks that running the build twice leads to the same files.
#[test]
fn build_twice() {
    let project = Project::new(FAKE_GO)
        .with_shim()
        .source("app.go", "package main\n\nfunc main() {}\n");

    project.command().assert().success();
    let artifact = read(&project.build_dir().join("output.wasm"));

    project.command().assert().success();
    assert_eq!(read(&project.build_dir().join("output.wasm")), artifact);
    assert_eq!(read(&project.build_dir().join("wasm_exec.js")), SHIM);
}

/// Checks that nothing is built when no file contains `func main()`.
#[test]
fn no_main_file() {
    let project = Project::new(FAKE_GO)
        .with_shim()
        .source("util.go", "package util\n\nfunc Helper() {}\n");

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no main Go file found"));

    assert!(!project.build_dir().join("output.wasm").exists());
}

/// Checks that the module is kept but the command fails when `wasm_exec.js` is missing.
#[test]
fn missing_wasm_exec() {
    let project = Project::new(FAKE_GO).source("main.go", "package main\n\nfunc main() {}\n");

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("wasm_exec.js not found at"));

    assert!(project.build_dir().join("output.wasm").exists());
    assert!(!project.build_dir().join("wasm_exec.js").exists());
}

/// Checks that the compiler output is shown when the build fails.
#[test]
fn compiler_failure() {
    let project = Project::new(FAILING_GO)
        .with_shim()
        .source("main.go", "package main\n\nfunc main() {}\n}\n");

    project
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("syntax error: unexpected }"))
        .stderr(predicate::str::contains("`go build`"));

    assert!(!project.build_dir().join("wasm_exec.js").exists());
}

/// Checks that the sources and output directories can be given explicitly.
#[test]
fn explicit_directories() {
    let project = Project::new(FAKE_GO)
        .with_shim()
        .source("server.go", "package main\n\nfunc main() {}\n");
    let cwd = TempDir::new().unwrap();

    project
        .command()
        .current_dir(cwd.path())
        .env_remove("goPath")
        .arg("-C")
        .arg(project.sources.path())
        .arg("--out-dir")
        .arg("dist")
        .arg("--go-root")
        .arg(project.toolchain.path())
        .assert()
        .success();

    let dist = project.sources.path().join("dist");
    assert_eq!(read(&dist.join("output.wasm")), b"\0asm server.go");
    assert_eq!(read(&dist.join("wasm_exec.js")), SHIM);
    assert!(!cwd.path().join("dist").exists());
}

/// Checks that `--print` only reports information.
#[test]
fn print_information() {
    let project = Project::new(FAKE_GO)
        .with_shim()
        .source("app.go", "package main\n\nfunc main() {}\n");

    project
        .command()
        .arg("--print=entry-point")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("app.go\n"));

    project
        .command()
        .arg("--print=wasm-exec-path")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("misc/wasm/wasm_exec.js\n"));

    assert!(!project.build_dir().exists());
}

/// Checks that the status line starts on its own line
/// when the compiler output does not end with a newline.
#[test]
fn unterminated_compiler_output() {
    let project = Project::new(UNTERMINATED_GO)
        .with_shim()
        .source("main.go", "package main\n\nfunc main() {}\n");

    project
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("go: downloading nothing\n"))
        .stdout(predicate::str::is_match(r"\n\s*Compiled ").unwrap());
}
