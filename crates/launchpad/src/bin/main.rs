// CLI for the token launchpad
//
// Plays the role of the token form and status screen: collects token
// metadata from flags, runs the launch through a keypair wallet and reports
// the outcome.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use token_launchpad::LaunchpadConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "token-launchpad")]
#[command(about = "Create SPL tokens from the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "launchpad.toml")]
    config: String,

    /// RPC URL, overrides the configured cluster
    #[arg(long)]
    rpc_url: Option<String>,

    /// Path to wallet keypair file
    #[arg(long, default_value = "~/.config/solana/id.json")]
    wallet: String,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pay the deployment fee and create a new token
    Create(commands::create::CreateCmd),

    /// Check token metadata without touching the network
    Validate(commands::inspect::ValidateCmd),

    /// Show the fee breakdown for the selected authorities
    Quote(commands::inspect::QuoteCmd),

    /// Show the SOL balance of the wallet or another address
    Balance(commands::inspect::BalanceCmd),

    /// Show a token balance held in an associated token account
    TokenBalance(commands::inspect::TokenBalanceCmd),

    /// Write a configuration file with default values
    InitConfig(commands::inspect::InitConfigCmd),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Commands return their failures; this is the only place they are printed
    if let Err(err) = run(cli).await {
        commands::utils::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {

    let mut config = LaunchpadConfig::load_or_default(&cli.config)?;

    if let Some(url) = cli.rpc_url {
        config.network.custom_rpc_url = Some(url);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config);

    match cli.command {
        Commands::Create(cmd) => commands::create::execute(cmd, &config, &cli.wallet).await,
        Commands::Validate(cmd) => commands::inspect::validate(cmd),
        Commands::Quote(cmd) => commands::inspect::quote(cmd, &config),
        Commands::Balance(cmd) => commands::inspect::balance(cmd, &config, &cli.wallet).await,
        Commands::TokenBalance(cmd) => {
            commands::inspect::token_balance(cmd, &config, &cli.wallet).await
        }
        Commands::InitConfig(cmd) => commands::inspect::init_config(cmd),
    }
}

fn init_logging(config: &LaunchpadConfig) {
    let log_level = config
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("token_launchpad={},solana_client=warn", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_needs_no_token_fields() {
        let cli = Cli::try_parse_from(["token-launchpad", "quote", "--freeze-authority"]).unwrap();
        match cli.command {
            Commands::Quote(cmd) => {
                assert!(cmd.freeze_authority);
                assert!(!cmd.mint_authority);
            }
            _ => panic!("expected quote"),
        }
    }

    #[test]
    fn test_create_still_requires_token_fields() {
        assert!(Cli::try_parse_from(["token-launchpad", "create", "--name", "Moon Coin"]).is_err());
    }
}
