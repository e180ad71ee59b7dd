//! Launchpad error types

use thiserror::Error;

use crate::constants::lamports_to_sol;

/// Launchpad error type
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Token metadata failed validation
    #[error("{0}")]
    Validation(String),

    /// Wallet has no public key
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Wallet cannot sign transactions
    #[error("Wallet does not support transaction signing")]
    SigningUnsupported,

    /// Wallet refused or failed to sign
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Balance does not cover fee plus margin
    #[error("Insufficient balance. You need at least {} SOL", required_sol(.required))]
    InsufficientBalance { required: u64, available: u64 },

    /// Fee payment did not confirm
    #[error("Fee transaction failed: {0}")]
    FeeTransaction(String),

    /// Mint creation did not confirm
    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    /// A deployment is already running or has not been reset
    #[error("Deployment already in progress")]
    DeploymentInProgress,

    /// Transaction was not confirmed before the timeout
    #[error("Transaction {signature} was not confirmed within {timeout_secs}s")]
    ConfirmationTimeout { signature: String, timeout_secs: u64 },

    /// Blockhash expired before the transaction landed
    #[error("Transaction {signature} expired at block height {last_valid_block_height}")]
    BlockhashExpired { signature: String, last_valid_block_height: u64 },

    /// Transaction landed with an error
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// RPC error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Other error
    #[error("Launchpad error: {0}")]
    Other(String),
}

impl From<solana_client::client_error::ClientError> for LaunchError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        LaunchError::Rpc(err.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for LaunchError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        LaunchError::Wallet(err.to_string())
    }
}

impl From<solana_sdk::program_error::ProgramError> for LaunchError {
    fn from(err: solana_sdk::program_error::ProgramError) -> Self {
        LaunchError::Other(err.to_string())
    }
}

impl From<std::io::Error> for LaunchError {
    fn from(err: std::io::Error) -> Self {
        LaunchError::Other(err.to_string())
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;

fn required_sol(required: &u64) -> f64 {
    lamports_to_sol(*required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_prefixes() {
        let fee = LaunchError::FeeTransaction("User rejected the request".to_string());
        assert_eq!(fee.to_string(), "Fee transaction failed: User rejected the request");

        let mint = LaunchError::TokenCreation("blockhash not found".to_string());
        assert!(mint.to_string().starts_with("Token creation failed"));
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = LaunchError::InsufficientBalance {
            required: 600_000_000,
            available: 10,
        };
        assert_eq!(err.to_string(), "Insufficient balance. You need at least 0.6 SOL");
    }
}
