use clap::Parser;

/// iota-evm-gateway process arguments. Every flag here has a matching
/// environment variable (§6.5) that takes precedence when set.
#[derive(Debug, Parser)]
#[clap(name = "iota-evm-gateway", about = "AI-facing multi-chain EVM gateway for the IOTA sibling chains")]
pub struct Cli {
    /// HTTP transport listen host (overridden by `HOST`)
    #[clap(long, default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP transport listen port (overridden by `PORT`)
    #[clap(long, default_value = "8080")]
    pub port: u16,

    /// Log level (overridden by `LOG_LEVEL`)
    #[clap(long, default_value = "info")]
    pub log_level: String,

    /// Resolve configuration, log a summary, and exit without starting
    /// either transport.
    #[clap(long)]
    pub config_check: bool,

    /// Disable the JSON-over-stdio transport (HTTP only).
    #[clap(long)]
    pub no_stdio: bool,
}
