//! Token Launchpad
//!
//! Creates SPL tokens on behalf of a connected wallet. A launch is two
//! transactions, run strictly in order:
//! - a fixed deployment fee transfer to the fee recipient
//! - a mint-creation bundle (create account, initialize mint, create the
//!   owner's associated token account, mint the initial supply)
//!
//! The chain endpoint and the wallet are injected through the
//! [`ChainClient`] and [`WalletSigner`] traits.

pub mod balances;
pub mod client;
pub mod config;
pub mod constants;
pub mod creator;
pub mod error;
pub mod fees;
pub mod status;
pub mod types;
pub mod validation;
pub mod wallet;

pub use client::{ChainClient, RpcChainClient};
pub use config::{FeeConfig, LaunchpadConfig, LoggingConfig, NetworkConfig};
pub use creator::{LaunchParams, TokenLauncher};
pub use error::{LaunchError, LaunchResult};
pub use fees::{FeeQuote, FeeSchedule};
pub use status::{DeploymentSession, DeploymentStatus};
pub use types::{DeploymentResult, TokenMetadata};
pub use validation::validate_token_metadata;
pub use wallet::{ApprovalMode, KeypairWallet, WalletSigner};
