use std::path::PathBuf;

use serde_json::{json, Value};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::error::{LaunchError, LaunchResult};
use crate::validation::validate_token_metadata;

/// User-supplied description of the token to launch
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    /// Human-scale supply, e.g. "1000000" or "2.5"
    pub supply: String,
    pub description: String,
    pub image: Option<PathBuf>,
    /// Keep a freeze authority on the mint
    pub freeze_authority: bool,
    pub mint_authority: bool,
    pub update_authority: bool,
    pub modify_creator: bool,
    pub creator_name: String,
    pub creator_website: String,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "My Meme Coin".to_string(),
            symbol: "MEME".to_string(),
            supply: "1000000000".to_string(),
            description: "A fun meme coin on Solana blockchain".to_string(),
            image: None,
            freeze_authority: false,
            mint_authority: false,
            update_authority: false,
            modify_creator: false,
            creator_name: "OfficialSolana".to_string(),
            creator_website: "https://officialsolana.com".to_string(),
        }
    }
}

impl TokenMetadata {
    /// Build metadata from the three required fields, defaults elsewhere
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, supply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            supply: supply.into(),
            ..Self::default()
        }
    }

    pub fn with_freeze_authority(mut self, enabled: bool) -> Self {
        self.freeze_authority = enabled;
        self
    }

    pub fn validate(&self) -> LaunchResult<()> {
        match validate_token_metadata(self) {
            Some(message) => Err(LaunchError::Validation(message)),
            None => Ok(()),
        }
    }
}

/// Outcome of a confirmed mint-creation transaction
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentResult {
    /// Address of the new mint
    pub token_address: Pubkey,
    /// Signature of the mint-creation transaction
    pub tx_signature: Signature,
    pub mint_authority: Pubkey,
    pub freeze_authority: Option<Pubkey>,
    /// Supply exactly as entered
    pub supply: String,
    /// Amount minted in base units
    pub raw_supply: u64,
    pub decimals: u8,
    /// Confirmed fee payment, absent when fees are not enforced
    pub fee_signature: Option<Signature>,
}

impl DeploymentResult {
    pub fn to_json(&self) -> Value {
        json!({
            "tokenAddress": self.token_address.to_string(),
            "txHash": self.tx_signature.to_string(),
            "mintAuthority": self.mint_authority.to_string(),
            "freezeAuthority": self.freeze_authority.map(|key| key.to_string()),
            "supply": self.supply,
            "rawSupply": self.raw_supply,
            "decimals": self.decimals,
            "feeTxHash": self.fee_signature.map(|sig| sig.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let metadata = TokenMetadata::default();
        assert_eq!(metadata.name, "My Meme Coin");
        assert_eq!(metadata.symbol, "MEME");
        assert_eq!(metadata.supply, "1000000000");
        assert!(!metadata.freeze_authority);
        assert!(metadata.validate().is_ok());
    }

    #[test]
    fn test_result_json_uses_null_freeze_authority() {
        let result = DeploymentResult {
            token_address: Pubkey::new_unique(),
            tx_signature: Signature::default(),
            mint_authority: Pubkey::new_unique(),
            freeze_authority: None,
            supply: "1000000".to_string(),
            raw_supply: 1_000_000_000_000_000,
            decimals: 9,
            fee_signature: None,
        };

        let value = result.to_json();
        assert!(value["freezeAuthority"].is_null());
        assert_eq!(value["supply"], "1000000");
        assert_eq!(value["tokenAddress"], result.token_address.to_string());
    }
}
