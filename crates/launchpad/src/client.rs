//! Chain endpoint abstraction
//!
//! The launch pipeline only needs a handful of RPC calls. They are collected
//! behind [`ChainClient`] so the pipeline can run against a real cluster or
//! an in-memory double.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::program_pack::Pack;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::error::{LaunchError, LaunchResult};

/// RPC operations used by the launch pipeline
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Native balance in lamports
    async fn get_balance(&self, owner: &Pubkey) -> LaunchResult<u64>;

    /// Latest blockhash with its last valid block height
    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> LaunchResult<(Hash, u64)>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64>;

    /// Submit a fully signed transaction
    async fn send_transaction(&self, transaction: &Transaction) -> LaunchResult<Signature>;

    /// Wait until the signature reaches `commitment`.
    ///
    /// Fails when the transaction errors, when the block height passes
    /// `last_valid_block_height`, or when the client timeout elapses.
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
        commitment: CommitmentConfig,
    ) -> LaunchResult<()>;

    /// Raw amount held by a token account, `None` when the account does not exist
    async fn get_token_account_amount(&self, address: &Pubkey) -> LaunchResult<Option<u64>>;
}

/// [`ChainClient`] backed by the nonblocking Solana RPC client
pub struct RpcChainClient {
    rpc: Arc<RpcClient>,
    timeout: Duration,
    poll_interval: Duration,
}

impl RpcChainClient {
    pub fn new(rpc: Arc<RpcClient>, timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            rpc,
            timeout,
            poll_interval,
        }
    }

    /// Build the client for the configured cluster
    pub fn from_config(config: &NetworkConfig) -> LaunchResult<Self> {
        let rpc = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url()?,
            config.transaction_timeout(),
            config.commitment_config(),
        );

        Ok(Self::new(
            Arc::new(rpc),
            config.transaction_timeout(),
            config.poll_interval(),
        ))
    }

    /// Get the RPC client
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Get the RPC endpoint URL
    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_balance(&self, owner: &Pubkey) -> LaunchResult<u64> {
        Ok(self.rpc.get_balance(owner).await?)
    }

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> LaunchResult<(Hash, u64)> {
        Ok(self.rpc.get_latest_blockhash_with_commitment(commitment).await?)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64> {
        Ok(self
            .rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> LaunchResult<Signature> {
        Ok(self.rpc.send_transaction(transaction).await?)
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
        commitment: CommitmentConfig,
    ) -> LaunchResult<()> {
        let deadline = Instant::now() + self.timeout;

        loop {
            match self
                .rpc
                .get_signature_status_with_commitment(signature, commitment)
                .await?
            {
                Some(Ok(())) => {
                    debug!(%signature, "transaction confirmed");
                    return Ok(());
                }
                Some(Err(err)) => {
                    return Err(LaunchError::TransactionFailed(err.to_string()));
                }
                None => {}
            }

            let block_height = self.rpc.get_block_height_with_commitment(commitment).await?;
            if block_height > last_valid_block_height {
                warn!(%signature, block_height, last_valid_block_height, "blockhash expired");
                return Err(LaunchError::BlockhashExpired {
                    signature: signature.to_string(),
                    last_valid_block_height,
                });
            }

            if Instant::now() >= deadline {
                return Err(LaunchError::ConfirmationTimeout {
                    signature: signature.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn get_token_account_amount(&self, address: &Pubkey) -> LaunchResult<Option<u64>> {
        let account = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?
            .value;

        match account {
            Some(account) => {
                let token_account = spl_token::state::Account::unpack(&account.data)?;
                Ok(Some(token_account.amount))
            }
            None => Ok(None),
        }
    }
}
