use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("gth error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = gate_config::GateConfig::load_with_dotenv()?;

    match cli.command {
        cli::Commands::Decode(args) => commands::decode::handle(&args, &config, cli.json),
        cli::Commands::Resolve(args) => commands::resolve::handle(&args, &config, cli.json).await,
        cli::Commands::Lookup(args) => commands::lookup::handle(&args, &config, cli.json).await,
        cli::Commands::Scan => commands::scan::handle(&config).await,
        cli::Commands::Serve => commands::serve::handle(config).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GATEHOUSE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
