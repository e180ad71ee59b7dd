// Token creation command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use token_launchpad::{
    ApprovalMode, DeploymentSession, DeploymentStatus, KeypairWallet, LaunchpadConfig,
    TokenMetadata,
};
use tracing::debug;

use super::utils::{build_launcher, info, load_keypair, success, warn};

/// Token form fields
#[derive(Args, Clone)]
pub struct MetadataArgs {
    /// Token name
    #[arg(long)]
    pub name: String,

    /// Token symbol, at most 10 characters
    #[arg(long)]
    pub symbol: String,

    /// Initial supply in whole tokens
    #[arg(long)]
    pub supply: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Path to the token image
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Keep a freeze authority on the mint
    #[arg(long)]
    pub freeze_authority: bool,

    #[arg(long)]
    pub mint_authority: bool,

    #[arg(long)]
    pub update_authority: bool,

    #[arg(long)]
    pub modify_creator: bool,

    #[arg(long, default_value = "")]
    pub creator_name: String,

    #[arg(long, default_value = "")]
    pub creator_website: String,
}

impl From<MetadataArgs> for TokenMetadata {
    fn from(args: MetadataArgs) -> Self {
        TokenMetadata {
            name: args.name,
            symbol: args.symbol,
            supply: args.supply,
            description: args.description,
            image: args.image,
            freeze_authority: args.freeze_authority,
            mint_authority: args.mint_authority,
            update_authority: args.update_authority,
            modify_creator: args.modify_creator,
            creator_name: args.creator_name,
            creator_website: args.creator_website,
        }
    }
}

#[derive(Args)]
pub struct CreateCmd {
    #[command(flatten)]
    metadata: MetadataArgs,

    /// Sign without asking for approval
    #[arg(short, long)]
    yes: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(cmd: CreateCmd, config: &LaunchpadConfig, wallet_path: &str) -> Result<()> {
    let approval = if cmd.yes {
        ApprovalMode::AutoApprove
    } else {
        ApprovalMode::Prompt
    };
    let wallet = KeypairWallet::new(load_keypair(wallet_path)?, approval);
    let launcher = build_launcher(config)?;

    let metadata = TokenMetadata::from(cmd.metadata);
    info(&format!(
        "Creating {} ({}) with supply {}",
        metadata.name, metadata.symbol, metadata.supply
    ));
    if config.fees.enforce_fees {
        info(&format!(
            "A deployment fee of {} SOL will be sent to {}",
            config.fees.deployment_fee_sol(),
            config.fees.fee_recipient
        ));
    } else {
        warn("Fee collection is disabled in the configuration");
    }

    let mut session = DeploymentSession::new(metadata);

    let mut updates = session.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let status = updates.borrow_and_update().clone();
            debug!(status = status.label(), progress = status.progress(), "deployment status");
        }
    });

    let outcome = session.deploy(&launcher, &wallet).await;
    renderer.abort();

    match (outcome, session.status()) {
        (Ok(result), DeploymentStatus::Success(_)) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&result.to_json())?);
            } else {
                success(&format!("Token created: {}", result.token_address));
                info(&format!("Transaction: {}", result.tx_signature));
                if let Some(fee_signature) = result.fee_signature {
                    info(&format!("Fee transaction: {}", fee_signature));
                }
                info(&format!("Mint authority: {}", result.mint_authority));
                match result.freeze_authority {
                    Some(authority) => info(&format!("Freeze authority: {}", authority)),
                    None => info("Freeze authority: none"),
                }
                info(&format!(
                    "Supply: {} ({} base units, {} decimals)",
                    result.supply, result.raw_supply, result.decimals
                ));
            }
            Ok(())
        }
        (Err(err), _) => Err(err.into()),
        (Ok(_), status) => anyhow::bail!("Unexpected deployment status: {}", status.label()),
    }
}
