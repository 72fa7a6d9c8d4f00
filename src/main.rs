use anyhow::Result;
use clap::Parser;
use protomap::cli::{Cli, Commands};
use protomap::commands::{self, AnalyzeConfig};
use protomap::observability::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    if let Err(err) = run(cli) {
        eprintln!("[X] Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::resolve_config(cli.config.as_deref())?;
    let format = |requested: Option<protomap::cli::OutputFormat>| {
        commands::effective_format(requested.map(Into::into), &config)
    };

    match cli.command {
        Commands::Analyze {
            path,
            requirement,
            format: requested,
            output,
        } => commands::handle_analyze(AnalyzeConfig {
            path,
            requirement: requirement.into(),
            format: format(requested),
            output,
            scan: config.scan.clone(),
        }),
        Commands::Scan {
            path,
            format: requested,
        } => commands::handle_scan(&path, format(requested), config.scan.clone()),
        Commands::Compare {
            protocols,
            format: requested,
        } => commands::handle_compare(&protocols, format(requested)),
        Commands::Migrate {
            from,
            to,
            format: requested,
        } => commands::handle_migrate(&from, &to, format(requested)),
        Commands::List {
            category,
            format: requested,
        } => commands::handle_list(category.into(), format(requested)),
        Commands::Init { force } => commands::init_config(force),
    }
}
