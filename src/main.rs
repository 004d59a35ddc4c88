use anyhow::Context;

use clap::{ColorChoice, Parser};

use console::style;

use go_wasm_build::{Event, Pipeline};

mod cli;
mod logging;

use crate::cli::{Args, Print};

fn print_information(pipeline: &Pipeline, print: Print) -> anyhow::Result<()> {
    match print {
        Print::EntryPoint => {
            let entry = pipeline
                .locate()
                .context("Failed to locate the entry point")?;
            println!("{}", entry.display());
        }
        Print::WasmExecPath => {
            println!("{}", pipeline.config().shim.resolve().display());
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.color == ColorChoice::Never {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    } else if args.color == ColorChoice::Always {
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(true);
    }
    logging::init(console::colors_enabled_stderr());

    let pipeline = Pipeline::new(args.config());

    if let Some(print) = args.print {
        return print_information(&pipeline, print);
    }

    pipeline.run(|event| match event {
        Event::BuildOutput(output) => {
            if !output.is_empty() {
                print!("{output}");
                if !output.as_bytes().ends_with(b"\n") {
                    println!();
                }
            }
        }
        Event::Compiled { entry, artifact } => println!(
            "{:>12} {} to {}",
            style("Compiled").bold().green(),
            entry.display(),
            artifact.display()
        ),
        Event::ShimCopied(shim) => println!(
            "{:>12} wasm_exec.js to {}",
            style("Copied").bold().green(),
            shim.display()
        ),
    })?;

    Ok(())
}
