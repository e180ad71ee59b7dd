//! Token launch pipeline
//!
//! A launch runs four gated steps in order: metadata validation, the balance
//! precondition, the fee transfer and the mint creation. Each step waits for
//! its predecessor's confirmation. The fee is not refunded when mint creation
//! fails afterwards.

use std::sync::Arc;

use solana_program::program_pack::Pack;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction,
    transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::{instruction as token_instruction, state::Mint};
use tracing::{debug, error, info};

use crate::client::ChainClient;
use crate::config::LaunchpadConfig;
use crate::constants::{
    lamports_to_sol, DEPLOYMENT_FEE_LAMPORTS, FEE_RECIPIENT, SAFETY_MARGIN_LAMPORTS, TOKEN_DECIMALS,
};
use crate::error::{LaunchError, LaunchResult};
use crate::types::{DeploymentResult, TokenMetadata};
use crate::validation::to_raw_supply;
use crate::wallet::WalletSigner;

/// Fixed parameters of a launch
#[derive(Debug, Clone)]
pub struct LaunchParams {
    pub deployment_fee_lamports: u64,
    pub fee_recipient: Pubkey,
    pub enforce_fees: bool,
    pub safety_margin_lamports: u64,
    pub decimals: u8,
    /// Commitment for blockhash fetches
    pub blockhash_commitment: CommitmentConfig,
    /// Commitment awaited after submission
    pub confirm_commitment: CommitmentConfig,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            deployment_fee_lamports: DEPLOYMENT_FEE_LAMPORTS,
            fee_recipient: FEE_RECIPIENT,
            enforce_fees: true,
            safety_margin_lamports: SAFETY_MARGIN_LAMPORTS,
            decimals: TOKEN_DECIMALS,
            blockhash_commitment: CommitmentConfig::finalized(),
            confirm_commitment: CommitmentConfig::confirmed(),
        }
    }
}

impl From<&LaunchpadConfig> for LaunchParams {
    fn from(config: &LaunchpadConfig) -> Self {
        Self {
            deployment_fee_lamports: config.fees.deployment_fee_lamports,
            fee_recipient: config.fees.fee_recipient,
            enforce_fees: config.fees.enforce_fees,
            safety_margin_lamports: config.fees.safety_margin_lamports,
            confirm_commitment: config.network.commitment_config(),
            ..Self::default()
        }
    }
}

impl LaunchParams {
    /// Balance required before the fee transaction is built
    pub fn required_balance(&self) -> u64 {
        let fee = if self.enforce_fees {
            self.deployment_fee_lamports
        } else {
            0
        };
        fee.saturating_add(self.safety_margin_lamports)
    }
}

/// Runs token launches against an injected chain client
pub struct TokenLauncher<C: ChainClient + ?Sized> {
    client: Arc<C>,
    params: LaunchParams,
}

impl<C: ChainClient + ?Sized> TokenLauncher<C> {
    pub fn new(client: Arc<C>, params: LaunchParams) -> Self {
        Self { client, params }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn params(&self) -> &LaunchParams {
        &self.params
    }

    /// Validate the metadata, then run the full launch
    pub async fn create_token<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        metadata: &TokenMetadata,
    ) -> LaunchResult<DeploymentResult> {
        metadata.validate()?;
        self.create_spl_token(wallet, metadata).await
    }

    /// Pay the deployment fee and create the mint.
    ///
    /// Expects metadata that already passed validation.
    pub async fn create_spl_token<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        metadata: &TokenMetadata,
    ) -> LaunchResult<DeploymentResult> {
        let owner = wallet.pubkey().ok_or(LaunchError::WalletNotConnected)?;
        if !wallet.can_sign() {
            return Err(LaunchError::SigningUnsupported);
        }

        info!(
            %owner,
            name = %metadata.name,
            symbol = %metadata.symbol,
            supply = %metadata.supply,
            freeze_authority = metadata.freeze_authority,
            "creating token"
        );

        let outcome = self.run_launch(wallet, owner, metadata).await;
        match &outcome {
            Ok(result) => info!(
                token = %result.token_address,
                signature = %result.tx_signature,
                "token created successfully"
            ),
            Err(err) => error!(%owner, error = %err, "token launch failed"),
        }
        outcome
    }

    async fn run_launch<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        owner: Pubkey,
        metadata: &TokenMetadata,
    ) -> LaunchResult<DeploymentResult> {
        // Known from the input alone, so fail before any fee is charged
        let raw_supply = self.raw_supply(metadata)?;

        self.ensure_sufficient_balance(&owner).await?;

        let fee_signature = if self.params.enforce_fees {
            Some(self.pay_deployment_fee(wallet, owner).await?)
        } else {
            debug!("fee collection disabled, skipping fee transaction");
            None
        };

        let mut result = self.create_mint(wallet, owner, metadata, raw_supply).await?;
        result.fee_signature = fee_signature;
        Ok(result)
    }

    /// Base-unit supply for `metadata`, or a token-creation failure when it
    /// does not fit in a mint
    pub fn raw_supply(&self, metadata: &TokenMetadata) -> LaunchResult<u64> {
        let decimals = self.params.decimals;
        to_raw_supply(&metadata.supply, decimals).ok_or_else(|| {
            LaunchError::TokenCreation(format!(
                "Supply {} cannot be represented with {} decimals",
                metadata.supply, decimals
            ))
        })
    }

    /// Fail unless `owner` holds the fee plus the safety margin
    pub async fn ensure_sufficient_balance(&self, owner: &Pubkey) -> LaunchResult<u64> {
        let available = self.client.get_balance(owner).await?;
        let required = self.params.required_balance();

        debug!(%owner, available, required, "balance check");

        if available < required {
            return Err(LaunchError::InsufficientBalance {
                required,
                available,
            });
        }

        Ok(available)
    }

    /// Transfer the deployment fee and wait for confirmation
    pub async fn pay_deployment_fee<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        owner: Pubkey,
    ) -> LaunchResult<Signature> {
        let instruction = system_instruction::transfer(
            &owner,
            &self.params.fee_recipient,
            self.params.deployment_fee_lamports,
        );

        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash(self.params.blockhash_commitment)
            .await?;
        let message = Message::new_with_blockhash(&[instruction], Some(&owner), &blockhash);
        let transaction = Transaction::new_unsigned(message);

        info!(
            %blockhash,
            fee_sol = lamports_to_sol(self.params.deployment_fee_lamports),
            recipient = %self.params.fee_recipient,
            "fee transaction prepared"
        );

        let signature = self
            .sign_and_submit(wallet, transaction, last_valid_block_height)
            .await
            .map_err(|err| {
                error!(error = %err, "fee transaction failed");
                LaunchError::FeeTransaction(err.to_string())
            })?;

        info!(%signature, "fee payment successful");
        Ok(signature)
    }

    /// Create, initialize and fund a new mint owned by the wallet
    pub async fn create_mint<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        owner: Pubkey,
        metadata: &TokenMetadata,
        raw_supply: u64,
    ) -> LaunchResult<DeploymentResult> {
        self.try_create_mint(wallet, owner, metadata, raw_supply)
            .await
            .map_err(|err| {
                error!(error = %err, "token creation transaction failed");
                LaunchError::TokenCreation(err.to_string())
            })
    }

    async fn try_create_mint<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        owner: Pubkey,
        metadata: &TokenMetadata,
        raw_supply: u64,
    ) -> LaunchResult<DeploymentResult> {
        let decimals = self.params.decimals;

        let mint_keypair = Keypair::new();
        let mint = mint_keypair.pubkey();
        info!(%mint, "generated mint keypair");

        let rent_lamports = self
            .client
            .get_minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;

        let freeze_authority = metadata.freeze_authority.then_some(owner);
        let instructions = build_mint_instructions(
            &owner,
            &mint,
            rent_lamports,
            decimals,
            freeze_authority.as_ref(),
            raw_supply,
        )?;

        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash(self.params.blockhash_commitment)
            .await?;
        let message = Message::new_with_blockhash(&instructions, Some(&owner), &blockhash);
        let mut transaction = Transaction::new_unsigned(message);

        info!(%blockhash, "token creation transaction prepared");

        // The new mint account must co-sign its own creation
        transaction.try_partial_sign(&[&mint_keypair], blockhash)?;

        let signature = self
            .sign_and_submit(wallet, transaction, last_valid_block_height)
            .await?;

        Ok(DeploymentResult {
            token_address: mint,
            tx_signature: signature,
            mint_authority: owner,
            freeze_authority,
            supply: metadata.supply.clone(),
            raw_supply,
            decimals,
            fee_signature: None,
        })
    }

    async fn sign_and_submit<W: WalletSigner + ?Sized>(
        &self,
        wallet: &W,
        transaction: Transaction,
        last_valid_block_height: u64,
    ) -> LaunchResult<Signature> {
        debug!("requesting wallet signature");
        let signed = wallet.sign_transaction(transaction).await?;

        let signature = self.client.send_transaction(&signed).await?;
        info!(%signature, "transaction sent, awaiting confirmation");

        self.client
            .confirm_transaction(
                &signature,
                last_valid_block_height,
                self.params.confirm_commitment,
            )
            .await?;

        Ok(signature)
    }
}

/// Instructions for a new mint, in submission order: create account,
/// initialize mint, create the owner's associated token account, mint the
/// supply into it.
pub fn build_mint_instructions(
    owner: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
    freeze_authority: Option<&Pubkey>,
    raw_supply: u64,
) -> LaunchResult<Vec<Instruction>> {
    let token_program = spl_token::id();
    let associated_account = get_associated_token_address(owner, mint);

    Ok(vec![
        system_instruction::create_account(
            owner,
            mint,
            rent_lamports,
            Mint::LEN as u64,
            &token_program,
        ),
        token_instruction::initialize_mint(
            &token_program,
            mint,
            owner,
            freeze_authority,
            decimals,
        )?,
        create_associated_token_account(owner, owner, mint, &token_program),
        token_instruction::mint_to(
            &token_program,
            mint,
            &associated_account,
            owner,
            &[],
            raw_supply,
        )?,
    ])
}
