// Command-line interface for opml
//
// This binary provides commands for converting, formatting and inspecting OPML outlines.
//
// The core capabilities use the opml-babel crate. This crate is only the shell around it: it
// reads files, layers configuration and reports errors.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  opml <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  opml convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  opml format <input>                    - Re-serialize an OPML file with the configured layout
//  opml inspect <path> [<view>]           - Render a view of the tree (defaults to "treeviz")
//  opml --list-formats                    - List available formats and views
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  opml inspect feeds.opml --extra-max-label-width 50 --extra-show-head
//
// Logging goes to stderr. OPML_LOG takes an env-filter directive (default "warn"); --verbose
// forces "debug".

mod inspect;

use clap::{Arg, ArgAction, Command, ValueHint};
use opml_babel::formats::common::parse_bool;
use opml_babel::formats::{OpmlFormat, TreevizFormat};
use opml_babel::FormatRegistry;
use opml_config::{Loader, OpmlConfig};
use std::collections::HashMap;
use std::fs;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "OPML_LOG";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // The next arg is a value unless it is another flag or absent
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("opml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting OPML outlines")
        .long_about(
            "opml is a command-line tool for working with OPML outline files.\n\n\
            Commands:\n  \
            - convert: Transform between formats (opml, json, treeviz)\n  \
            - format:  Re-serialize an OPML file with the configured layout\n  \
            - inspect: View the imported outline tree\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            opml inspect feeds.opml                    # View tree visualization\n  \
            opml inspect feeds.opml stats              # Outline counts and depth\n  \
            opml feeds.opml --to json                  # Convert to JSON (outputs to stdout)\n  \
            opml tree.json --to opml -o feeds.opml     # Convert JSON back to OPML\n  \
            opml format feeds.opml --extra-indent 2    # Re-indent with two spaces",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect views")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an opml.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the outline tree of a file")
                .long_about(
                    "View the canonical outline tree a file imports to.\n\n\
                    Views:\n  \
                    - treeviz:  Tree visualization (default)\n  \
                    - json:     Canonical tree as JSON\n  \
                    - stats:    Outline count, leaves and maximum depth\n\n\
                    Extra Parameters (treeviz):\n  \
                    --extra-max-label-width <n>   Truncate labels to n characters\n  \
                    --extra-show-head             List head fields\n\n\
                    Examples:\n  \
                    opml inspect feeds.opml                  # Tree visualization (default)\n  \
                    opml inspect feeds.opml json             # Canonical JSON\n  \
                    opml inspect feeds.opml --extra-show-head",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to render. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_VIEWS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension, else opml)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - opml:     OPML 2.0 (.opml)\n  \
                    - json:     Canonical outline tree (.json)\n  \
                    - treeviz:  Tree visualization, output only (.tree)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    opml convert feeds.opml --to json           # Convert to JSON (stdout)\n  \
                    opml convert tree.json --to opml -o a.opml  # JSON to OPML file\n  \
                    opml feeds.opml --to treeviz                # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Format an OPML file")
                .long_about(
                    "Format an OPML file using the configured export options.\n\n\
                    This command imports the input file and re-serializes it,\n\
                    applying the configured indentation and head escaping.\n\n\
                    Output is always written to stdout.\n\n\
                    Examples:\n  \
                    opml format feeds.opml                   # Format to stdout\n  \
                    opml format feeds.opml > formatted.opml  # Redirect to file",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a flag or a subcommand is taken as the input file
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["inspect", "convert", "format", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    apply_config_overrides(&mut config, &mut extra_params);
    let registry = registry_from_config(&config);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("path is required");
            };
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            let from = sub_matches
                .get_one::<String>("from")
                .cloned()
                .or_else(|| registry.detect_format_from_filename(path))
                .unwrap_or_else(|| "opml".to_string());
            handle_inspect_command(&registry, path, &from, view, &extra_params);
        }
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                exit_with("input and --to are required");
            };

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        Some(("format", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with("input is required");
            };
            // Format command always outputs to stdout (no -o flag)
            handle_convert_command(&registry, input, "opml", "opml", None, &extra_params);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(
    registry: &FormatRegistry,
    path: &str,
    from: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
) {
    let source = read_source(path);
    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let output = inspect::execute_view(registry, &doc, view, extra_params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = read_source(input);
    debug!(input, from, to, "converting");

    let result = registry
        .convert(&source, from, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &OpmlConfig) {
    let registry = registry_from_config(config);
    println!("Conversion formats:");
    for format_name in registry.list_formats() {
        let Ok(format) = registry.get(&format_name) else {
            continue;
        };
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("read");
        }
        if format.supports_serialization() {
            modes.push("write");
        }
        println!(
            "  {format_name:<10} {:<12} {}",
            modes.join("/"),
            format.description()
        );
    }
    println!("\nInspect views:");
    for view in inspect::AVAILABLE_VIEWS {
        println!("  {view}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> OpmlConfig {
    let loader = Loader::new().with_optional_file("opml.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Default formats, with OPML and treeviz set up from the configuration.
fn registry_from_config(config: &OpmlConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(OpmlFormat::new((&config.export).into()));
    registry.register(
        TreevizFormat::new(config.inspect.treeviz.max_label_width)
            .with_show_head(config.inspect.treeviz.show_head),
    );
    registry
}

/// Moves extras that have a configuration counterpart into the config.
///
/// Everything left in `extra_params` is handed to the target format as is.
fn apply_config_overrides(config: &mut OpmlConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("escape-head") {
        config.export.escape_head = parse_bool_arg("escape-head", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["max-label-width", "width"]) {
        config.inspect.treeviz.max_label_width = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid number '{raw}' for --extra-max-label-width");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("show-head") {
        config.inspect.treeviz.show_head = parse_bool_arg("show-head", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    parse_bool(raw).unwrap_or_else(|| {
        eprintln!("Invalid boolean value '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
