use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use drillforge::config::Config;
use drillforge::error::DrResult;
use std::process;
use tracing::{debug, error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: Config,

    /// JSON config file; flags given on the command line still win
    #[arg(global = true, long = "config")]
    config_path: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Practice a sequence in the terminal
    Play(cmd::play::PlayArgs),
    /// Show derived stats
    Stats(cmd::stats::StatsArgs),
    /// Delete the stats record of a sequence
    ClearStats(cmd::stats::ClearArgs),
    /// Manage stored sequences
    Sequences(cmd::sequences::SequencesArgs),
    /// Manage keybinds
    Keybinds(cmd::keybinds::KeybindsArgs),
}

fn from_cli(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// File values replace defaults; explicit flags override the file.
fn resolve_config(cli: &Cli, matches: &ArgMatches) -> DrResult<Config> {
    let Some(path) = &cli.config_path else {
        return Ok(cli.config.clone());
    };

    info!("📂 Loading config: {}", path);
    let mut config = Config::load_from_file(path)?;
    let flags = &cli.config;

    if from_cli(matches, "data_dir") {
        config.store.data_dir = flags.store.data_dir.clone();
    }
    if from_cli(matches, "keybinds_file") {
        config.store.keybinds_file = flags.store.keybinds_file.clone();
    }
    if from_cli(matches, "sequences_file") {
        config.store.sequences_file = flags.store.sequences_file.clone();
    }
    if from_cli(matches, "stats_file") {
        config.store.stats_file = flags.store.stats_file.clone();
    }
    if from_cli(matches, "poll_ms") {
        config.capture.poll_ms = flags.capture.poll_ms;
    }
    Ok(config)
}

fn dispatch(command: Commands, config: &Config) -> DrResult<()> {
    match command {
        Commands::Play(args) => cmd::play::run(args, config),
        Commands::Stats(args) => cmd::stats::run(args, config),
        Commands::ClearStats(args) => cmd::stats::clear(args, config),
        Commands::Sequences(args) => cmd::sequences::run(args, config),
        Commands::Keybinds(args) => cmd::keybinds::run(args, config),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli, &matches).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    debug!("Data directory: {}", config.store.data_dir);

    if let Err(e) = dispatch(cli.command, &config) {
        error!("{}", e);
        process::exit(1);
    }
}
