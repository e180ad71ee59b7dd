//! Shared test doubles for the launch pipeline

#![allow(dead_code)]

pub mod tracing;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use token_launchpad::{
    ChainClient, LaunchError, LaunchParams, LaunchResult, TokenLauncher, WalletSigner,
};

pub const RICH: u64 = 5_000_000_000;
pub const MINT_RENT: u64 = 1_461_600;

/// In-memory chain endpoint that records every call
#[derive(Default)]
pub struct MockChainClient {
    balance: Mutex<u64>,
    /// Zero-based index of the `send_transaction` call that should fail
    fail_send_at: Mutex<Option<usize>>,
    confirm_delay: Mutex<Option<Duration>>,
    token_amounts: Mutex<HashMap<Pubkey, u64>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub sent: Mutex<Vec<Transaction>>,
    pub confirmed: Mutex<Vec<Signature>>,
    pub commitments: Mutex<Vec<(&'static str, CommitmentConfig)>>,
}

impl MockChainClient {
    pub fn with_balance(balance: u64) -> Arc<Self> {
        let client = Self::default();
        *client.balance.lock().unwrap() = balance;
        Arc::new(client)
    }

    pub fn fail_send_at(&self, index: usize) {
        *self.fail_send_at.lock().unwrap() = Some(index);
    }

    pub fn clear_failures(&self) {
        *self.fail_send_at.lock().unwrap() = None;
    }

    pub fn delay_confirmations(&self, delay: Duration) {
        *self.confirm_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_token_amount(&self, account: Pubkey, amount: u64) {
        self.token_amounts.lock().unwrap().insert(account, amount);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    pub fn confirmed(&self) -> Vec<Signature> {
        self.confirmed.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn get_balance(&self, _owner: &Pubkey) -> LaunchResult<u64> {
        self.record("get_balance");
        Ok(*self.balance.lock().unwrap())
    }

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> LaunchResult<(Hash, u64)> {
        self.record("get_latest_blockhash");
        self.commitments
            .lock()
            .unwrap()
            .push(("get_latest_blockhash", commitment));
        Ok((Hash::new_unique(), 1_000))
    }

    async fn get_minimum_balance_for_rent_exemption(&self, _data_len: usize) -> LaunchResult<u64> {
        self.record("get_minimum_balance_for_rent_exemption");
        Ok(MINT_RENT)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> LaunchResult<Signature> {
        self.record("send_transaction");
        let index = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(transaction.clone());
            sent.len() - 1
        };

        if *self.fail_send_at.lock().unwrap() == Some(index) {
            return Err(LaunchError::Rpc("simulated send failure".to_string()));
        }

        transaction
            .verify()
            .map_err(|e| LaunchError::Rpc(format!("signature verification failed: {}", e)))?;

        Ok(transaction.signatures[0])
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        _last_valid_block_height: u64,
        commitment: CommitmentConfig,
    ) -> LaunchResult<()> {
        self.record("confirm_transaction");
        self.commitments
            .lock()
            .unwrap()
            .push(("confirm_transaction", commitment));

        let delay = *self.confirm_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.confirmed.lock().unwrap().push(*signature);
        Ok(())
    }

    async fn get_token_account_amount(&self, address: &Pubkey) -> LaunchResult<Option<u64>> {
        self.record("get_token_account_amount");
        Ok(self.token_amounts.lock().unwrap().get(address).copied())
    }
}

/// Wallet double with switchable connection, capability and approval
pub struct MockWallet {
    keypair: Keypair,
    connected: bool,
    can_sign: bool,
    /// Reject signature requests from this zero-based index on
    reject_from: Mutex<Option<usize>>,
    requests: Mutex<usize>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            keypair: Keypair::new(),
            connected: true,
            can_sign: true,
            reject_from: Mutex::new(None),
            requests: Mutex::new(0),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    pub fn read_only() -> Self {
        Self {
            can_sign: false,
            ..Self::new()
        }
    }

    pub fn reject_from(self, index: usize) -> Self {
        *self.reject_from.lock().unwrap() = Some(index);
        self
    }

    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    fn pubkey(&self) -> Option<Pubkey> {
        self.connected.then(|| self.keypair.pubkey())
    }

    fn can_sign(&self) -> bool {
        self.can_sign
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> LaunchResult<Transaction> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            *requests += 1;
            *requests - 1
        };

        if let Some(from) = *self.reject_from.lock().unwrap() {
            if index >= from {
                return Err(LaunchError::Wallet("User rejected the request".to_string()));
            }
        }

        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        Ok(transaction)
    }
}

pub fn launcher(client: &Arc<MockChainClient>) -> TokenLauncher<MockChainClient> {
    TokenLauncher::new(client.clone(), LaunchParams::default())
}
