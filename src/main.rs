use clap::builder::FalseyValueParser;
use clap::{ArgAction, CommandFactory, Parser};
use compactor::compact::DEFAULT_OUTPUT_FILE;
use compactor::logger::initialize_logger;
use compactor::{compact_to_file, CompactorConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Project directory to scan
    path: Option<PathBuf>,
    #[arg(
        short = 'c',
        long,
        env = "COMPACTOR_INCLUDE_CONFIG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Include configuration files (package.json, tsconfig.json, etc.)"
    )]
    config: bool,
    #[arg(
        long,
        env = "COMPACTOR_STATS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Print token counts per file"
    )]
    stats: bool,
    #[arg(short = 'M', long, default_value = "gpt-4o", help = "Tokenizer model for --stats")]
    model: String,
}

fn main() -> ExitCode {
    let cli_args = CliArgs::parse();

    let Some(project_path) = cli_args.path else {
        if let Err(e) = CliArgs::command().print_help() {
            eprintln!("Error printing usage: {}", e);
        }
        return ExitCode::FAILURE;
    };

    initialize_logger();

    let config = CompactorConfig {
        include_config: cli_args.config,
        stats: cli_args.stats,
        model: cli_args.model,
    };
    let output = Path::new(DEFAULT_OUTPUT_FILE);

    match compact_to_file(config, &project_path, output) {
        Ok(_) => {
            println!("Output written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
