//! `uto` command line entry point

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;
use uto_cli::{load_config, run_inspect, run_migrate, run_new_project};

fn cli() -> Command {
    Command::new("uto")
        .version(uto_cli::VERSION)
        .about("Project document tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Migrate a saved project document to the current version")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Saved document (JSON)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the migrated document here instead of stdout"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Migration config (TOML)"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the version and paths of a saved project document")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Saved document (JSON)"),
                ),
        )
        .subcommand(
            Command::new("new-project")
                .about("Create a new project document")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the document here instead of stdout"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    match matches.subcommand() {
        Some(("migrate", args)) => {
            let input = args
                .get_one::<PathBuf>("input")
                .ok_or_else(|| anyhow::anyhow!("missing input"))?;
            let output = args.get_one::<PathBuf>("output");
            let config = load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
            let (text, report) = run_migrate(input, output.map(PathBuf::as_path), config)?;
            tracing::info!(
                from_version = report.from_version,
                to_version = report.to_version,
                diagnostics = report.diagnostics.len(),
                "migration finished"
            );
            print(&text);
        }
        Some(("inspect", args)) => {
            let input = args
                .get_one::<PathBuf>("input")
                .ok_or_else(|| anyhow::anyhow!("missing input"))?;
            print(&run_inspect(input)?);
        }
        Some(("new-project", args)) => {
            let output = args.get_one::<PathBuf>("output");
            print(&run_new_project(output.map(PathBuf::as_path))?);
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}
