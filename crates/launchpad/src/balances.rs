use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::client::ChainClient;
use crate::constants::{lamports_to_sol, TOKEN_DECIMALS};
use crate::error::LaunchResult;

/// SOL balance of `owner`
pub async fn sol_balance<C: ChainClient + ?Sized>(client: &C, owner: &Pubkey) -> LaunchResult<f64> {
    let lamports = client.get_balance(owner).await?;
    Ok(lamports_to_sol(lamports))
}

/// Balance of a launchpad token held in the owner's associated account.
///
/// A missing associated account reads as zero.
pub async fn token_balance<C: ChainClient + ?Sized>(
    client: &C,
    owner: &Pubkey,
    mint: &Pubkey,
) -> LaunchResult<f64> {
    let ata = get_associated_token_address(owner, mint);
    let amount = client.get_token_account_amount(&ata).await?.unwrap_or(0);
    Ok(amount as f64 / 10f64.powi(TOKEN_DECIMALS as i32))
}
