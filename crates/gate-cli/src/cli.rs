use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `gth` binary.
#[derive(Debug, Parser)]
#[command(name = "gth", version, about = "Gatehouse - agent ID-card lookup kiosk")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a scanned or typed payload into an agent code
    Decode(DecodeArgs),

    /// Probe which image extension variant exists for an agent code
    Resolve(ResolveArgs),

    /// Decode a payload, then resolve its card (the scan/search flow)
    Lookup(LookupArgs),

    /// Read payloads line by line from stdin and look each one up
    Scan,

    /// Run the kiosk upload/asset server
    Serve,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Raw payload: bare code, JSON object, or URL
    pub payload: String,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Agent code to probe for
    pub code: String,

    /// Override the configured probe base (URL prefix or directory)
    #[arg(long)]
    pub base: Option<String>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Raw payload: bare code, JSON object, or URL
    pub payload: String,

    /// Override the configured probe base (URL prefix or directory)
    #[arg(long)]
    pub base: Option<String>,
}
