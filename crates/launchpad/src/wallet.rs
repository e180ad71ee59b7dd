//! Wallet capability used to authorize launch transactions
//!
//! The launchpad never holds the user's private key directly; it hands
//! unsigned transactions to a [`WalletSigner`] and waits for the signed copy.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};
use tracing::debug;

use crate::error::{LaunchError, LaunchResult};

/// Signing agent controlled by the user
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Connected address, `None` while disconnected
    fn pubkey(&self) -> Option<Pubkey>;

    fn can_sign(&self) -> bool {
        true
    }

    /// Sign one transaction. May wait for user approval and fails on rejection.
    async fn sign_transaction(&self, transaction: Transaction) -> LaunchResult<Transaction>;

    fn supports_sign_all(&self) -> bool {
        false
    }

    /// Sign several transactions behind a single approval
    async fn sign_all_transactions(
        &self,
        _transactions: Vec<Transaction>,
    ) -> LaunchResult<Vec<Transaction>> {
        Err(LaunchError::SigningUnsupported)
    }
}

/// How a [`KeypairWallet`] obtains approval before signing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalMode {
    /// Sign without asking
    AutoApprove,
    /// Ask on the terminal before every signature request
    Prompt,
}

/// Wallet backed by a local keypair file
pub struct KeypairWallet {
    keypair: Keypair,
    approval: ApprovalMode,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, approval: ApprovalMode) -> Self {
        Self { keypair, approval }
    }

    async fn approve(&self, summary: String) -> LaunchResult<()> {
        if self.approval == ApprovalMode::AutoApprove {
            return Ok(());
        }

        let approved = tokio::task::spawn_blocking(move || prompt_approval(&summary))
            .await
            .map_err(|e| LaunchError::Wallet(format!("approval prompt failed: {}", e)))??;

        if approved {
            Ok(())
        } else {
            Err(LaunchError::Wallet("User rejected the request".to_string()))
        }
    }

    fn sign_in_place(&self, transaction: &mut Transaction) -> LaunchResult<()> {
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        Ok(())
    }
}

#[async_trait]
impl WalletSigner for KeypairWallet {
    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> LaunchResult<Transaction> {
        self.approve(describe(&transaction)).await?;
        self.sign_in_place(&mut transaction)?;
        debug!(signer = %self.keypair.pubkey(), "transaction signed");
        Ok(transaction)
    }

    fn supports_sign_all(&self) -> bool {
        true
    }

    async fn sign_all_transactions(
        &self,
        mut transactions: Vec<Transaction>,
    ) -> LaunchResult<Vec<Transaction>> {
        let summary = format!("{} transactions", transactions.len());
        self.approve(summary).await?;
        for transaction in transactions.iter_mut() {
            self.sign_in_place(transaction)?;
        }
        Ok(transactions)
    }
}

fn describe(transaction: &Transaction) -> String {
    let fee_payer = transaction
        .message
        .account_keys
        .first()
        .map(|key| key.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "transaction with {} instruction(s), fee payer {}",
        transaction.message.instructions.len(),
        fee_payer
    )
}

fn prompt_approval(summary: &str) -> LaunchResult<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Approve {}? [y/N] ", summary)?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
