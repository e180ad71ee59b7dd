// Read-only commands: validation, fee quote, balances, config scaffolding

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use solana_sdk::signer::Signer;
use token_launchpad::{
    balances, validate_token_metadata, FeeQuote, FeeSchedule, LaunchpadConfig, TokenMetadata,
};

use super::create::MetadataArgs;
use super::utils::{build_client, info, load_keypair, parse_pubkey, success};

#[derive(Args)]
pub struct ValidateCmd {
    #[command(flatten)]
    metadata: MetadataArgs,
}

/// Authority selections that change the quoted fee
#[derive(Args)]
pub struct QuoteCmd {
    #[arg(long)]
    pub freeze_authority: bool,

    #[arg(long)]
    pub mint_authority: bool,

    #[arg(long)]
    pub update_authority: bool,

    #[arg(long)]
    pub modify_creator: bool,
}

impl QuoteCmd {
    fn quote(&self, schedule: &FeeSchedule) -> FeeQuote {
        let metadata = TokenMetadata {
            freeze_authority: self.freeze_authority,
            mint_authority: self.mint_authority,
            update_authority: self.update_authority,
            modify_creator: self.modify_creator,
            ..TokenMetadata::default()
        };
        FeeQuote::for_metadata(&metadata, schedule)
    }
}

#[derive(Args)]
pub struct BalanceCmd {
    /// Address to query, defaults to the wallet
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args)]
pub struct TokenBalanceCmd {
    /// Token mint address
    #[arg(long)]
    mint: String,

    /// Token owner, defaults to the wallet
    #[arg(long)]
    owner: Option<String>,
}

#[derive(Args)]
pub struct InitConfigCmd {
    /// Where to write the configuration
    #[arg(long, default_value = "launchpad.toml")]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn validate(cmd: ValidateCmd) -> Result<()> {
    let metadata = TokenMetadata::from(cmd.metadata);
    match validate_token_metadata(&metadata) {
        None => {
            success("Token metadata is valid");
            Ok(())
        }
        Some(message) => anyhow::bail!(message),
    }
}

pub fn quote(cmd: QuoteCmd, config: &LaunchpadConfig) -> Result<()> {
    let quote = cmd.quote(&FeeSchedule::default());

    for (item, lamports) in &quote.items {
        info(&format!("{:<18} {} SOL", item, token_launchpad::constants::lamports_to_sol(*lamports)));
    }
    info(&format!("{:<18} {} SOL", "Total", quote.total_sol()));
    info(&format!(
        "Deployment fee charged: {} SOL",
        config.fees.deployment_fee_sol()
    ));
    Ok(())
}

pub async fn balance(cmd: BalanceCmd, config: &LaunchpadConfig, wallet_path: &str) -> Result<()> {
    let address = match cmd.address {
        Some(address) => parse_pubkey(&address)?,
        None => load_keypair(wallet_path)?.pubkey(),
    };

    let client = build_client(config)?;
    let sol = balances::sol_balance(client.as_ref(), &address)
        .await
        .context("Failed to fetch SOL balance")?;

    info(&format!("{}: {} SOL", address, sol));
    Ok(())
}

pub async fn token_balance(
    cmd: TokenBalanceCmd,
    config: &LaunchpadConfig,
    wallet_path: &str,
) -> Result<()> {
    let mint = parse_pubkey(&cmd.mint)?;
    let owner = match cmd.owner {
        Some(owner) => parse_pubkey(&owner)?,
        None => load_keypair(wallet_path)?.pubkey(),
    };

    let client = build_client(config)?;
    let amount = balances::token_balance(client.as_ref(), &owner, &mint)
        .await
        .context("Failed to fetch token balance")?;

    info(&format!("{} holds {} of {}", owner, amount, mint));
    Ok(())
}

pub fn init_config(cmd: InitConfigCmd) -> Result<()> {
    if cmd.output.exists() && !cmd.force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            cmd.output.display()
        );
    }

    LaunchpadConfig::default().save(&cmd.output)?;
    success(&format!("Wrote {}", cmd.output.display()));
    Ok(())
}
