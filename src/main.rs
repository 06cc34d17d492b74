// src/main.rs — capitals entry point

use clap::Parser;

use capitals::cli::{lookup, serve, Cli, Commands};
use capitals::infra::config::Config;
use capitals::infra::logger;

#[tokio::main]
async fn main() {
    // A missing .env is fine; real deployments set the variables directly.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging (respects RUST_LOG)
    logger::init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    match &cli.command {
        Some(Commands::Classify { text }) => {
            lookup::run_classify(&text.join(" "));
            Ok(())
        }
        Some(Commands::Lookup { country }) => lookup::run_lookup(&country.join(" "), &config).await,
        Some(Commands::Serve) | None => serve::run_serve(&config).await,
    }
}
