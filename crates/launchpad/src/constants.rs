//! Fixed protocol parameters

use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};

/// Deployment fee charged for every launch (0.5 SOL)
pub const DEPLOYMENT_FEE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 2;

/// Headroom required on top of the fee before a launch starts (0.1 SOL)
pub const SAFETY_MARGIN_LAMPORTS: u64 = LAMPORTS_PER_SOL / 10;

/// Default fee recipient
pub const FEE_RECIPIENT: Pubkey = solana_sdk::pubkey!("9ktvrbraBWAaNtGZYx5CGuo1XqgUHQByC3X3r4DSkqua");

/// Decimals for every token created by the launchpad
pub const TOKEN_DECIMALS: u8 = 9;

pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Largest raw supply a mint can hold
pub const MAX_RAW_SUPPLY: u64 = u64::MAX;

/// Confirmation ceiling for submitted transactions
pub const TRANSACTION_TIMEOUT_SECS: u64 = 60;

pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 500;

/// Cosmetic progress ticker settings
pub const PROGRESS_TICK_MS: u64 = 300;
pub const PROGRESS_STEP: u8 = 5;
pub const PROGRESS_CEILING: u8 = 90;

/// Convert lamports to SOL for display
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Convert SOL to lamports, truncating sub-lamport precision
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_constants() {
        assert_eq!(DEPLOYMENT_FEE_LAMPORTS, 500_000_000);
        assert_eq!(SAFETY_MARGIN_LAMPORTS, 100_000_000);
        assert_eq!(lamports_to_sol(DEPLOYMENT_FEE_LAMPORTS + SAFETY_MARGIN_LAMPORTS), 0.6);
        assert_eq!(sol_to_lamports(0.5), DEPLOYMENT_FEE_LAMPORTS);
    }
}
