use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the views from src/inspect.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_VIEWS: &[&str] = &["treeviz", "json", "stats"];

// Formats registered by opml-babel's FormatRegistry::with_defaults
const AVAILABLE_FORMATS: &[&str] = &["json", "opml", "treeviz"];

fn format_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let input = || {
        Arg::new("input")
            .help("Input file path")
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("opml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting OPML outlines")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect views")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to an opml.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the outline tree of a file")
                .arg(input())
                .arg(
                    Arg::new("view")
                        .help("View to render")
                        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_VIEWS))
                        .index(2),
                )
                .arg(format_arg("from", "Source format")),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats")
                .arg(input())
                .arg(format_arg("from", "Source format"))
                .arg(format_arg("to", "Target format"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Format an OPML file")
                .arg(input()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "opml", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "opml", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "opml", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
