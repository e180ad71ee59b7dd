// Utility functions for CLI commands

use std::sync::Arc;

use anyhow::{Context, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};
use std::str::FromStr;
use token_launchpad::{LaunchParams, LaunchpadConfig, RpcChainClient, TokenLauncher};

/// Load a keypair from a file path, expanding ~ if needed
pub fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = if path.starts_with('~') {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        path.replacen('~', &home, 1)
    } else {
        path.to_string()
    };

    read_keypair_file(&expanded_path)
        .map_err(|e| anyhow::anyhow!("Failed to load keypair from {}: {}", expanded_path, e))
}

/// Parse a pubkey from string
pub fn parse_pubkey(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).with_context(|| format!("Invalid public key: {}", s))
}

/// RPC-backed client for the configured cluster
pub fn build_client(config: &LaunchpadConfig) -> Result<Arc<RpcChainClient>> {
    let client = RpcChainClient::from_config(&config.network)
        .context("Failed to build RPC client")?;
    Ok(Arc::new(client))
}

pub fn build_launcher(config: &LaunchpadConfig) -> Result<TokenLauncher<RpcChainClient>> {
    let client = build_client(config)?;
    Ok(TokenLauncher::new(client, LaunchParams::from(config)))
}

/// Print success message with checkmark
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    eprintln!("[WARN] {}", msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("[ERROR] {}", msg);
}
