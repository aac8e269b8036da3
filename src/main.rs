//! blacklist - keep an IP blacklist file and mirror it into an iptables chain.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use blacklist::cli::{Cli, Commands};
use blacklist::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let load_config = || Config::load_with_override(&cli.config, cli.file.as_deref());

    match cli.command {
        Commands::Add { ref ip } => blacklist::commands::add::run(ip, &load_config()?),
        Commands::Del { ref ip } => blacklist::commands::del::run(ip, &load_config()?),
        Commands::List => blacklist::commands::list::run(&load_config()?),
        Commands::Find { ref ip } => blacklist::commands::find::run(ip, &load_config()?),
        Commands::Count => blacklist::commands::count::run(&load_config()?),
        Commands::Check => blacklist::commands::check::run(&load_config()?),
        Commands::Reload => blacklist::commands::reload::run(&load_config()?),
        Commands::Flush => blacklist::commands::flush::run(&load_config()?),
        Commands::Rules => blacklist::commands::rules::run(&load_config()?),
        Commands::Version => {
            println!("blacklist {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
