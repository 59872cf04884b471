//! wurfl-cloud CLI - resolve user agents to device capabilities

use clap::Parser;

mod cli;
mod output;

use cli::{CacheCommands, Cli, Commands, ConfigCommands, GlobalOptions};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Lookup(args) => cli::lookup::run(args, &opts).await,
        Commands::Batch(args) => cli::batch::run(args, &opts).await,
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::Init { force } => cli::config::init(&opts, force),
        },
    }
}

/// `--debug` forces debug level; otherwise RUST_LOG applies, defaulting to warn
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
