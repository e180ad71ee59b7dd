//! Authority-based fee breakdown shown before a launch.
//!
//! This is a quote only. The amount actually transferred is always the
//! configured deployment fee.

use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::constants::lamports_to_sol;
use crate::types::TokenMetadata;

/// Per-item prices used to build a [`FeeQuote`], in lamports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub base_fee: u64,
    pub freeze_fee: u64,
    pub mint_fee: u64,
    pub update_fee: u64,
    pub creator_fee: u64,
    /// Upper bound on the total
    pub cap: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let tenth = LAMPORTS_PER_SOL / 10;
        Self {
            base_fee: tenth,
            freeze_fee: tenth,
            mint_fee: tenth,
            update_fee: tenth,
            creator_fee: tenth,
            cap: LAMPORTS_PER_SOL / 2,
        }
    }
}

/// Itemized quote for a token's selected authorities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuote {
    pub items: Vec<(&'static str, u64)>,
    pub total: u64,
}

impl FeeQuote {
    pub fn for_metadata(metadata: &TokenMetadata, schedule: &FeeSchedule) -> Self {
        let mut items = vec![("Base Fee", schedule.base_fee)];

        if metadata.freeze_authority {
            items.push(("Freeze Authority", schedule.freeze_fee));
        }
        if metadata.mint_authority {
            items.push(("Mint Authority", schedule.mint_fee));
        }
        if metadata.update_authority {
            items.push(("Update Authority", schedule.update_fee));
        }
        if metadata.modify_creator {
            items.push(("Modify Creator", schedule.creator_fee));
        }

        let sum = items
            .iter()
            .fold(0u64, |acc, (_, fee)| acc.saturating_add(*fee));

        Self {
            items,
            total: sum.min(schedule.cap),
        }
    }

    pub fn total_sol(&self) -> f64 {
        lamports_to_sol(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_fee_only() {
        let quote = FeeQuote::for_metadata(&TokenMetadata::default(), &FeeSchedule::default());
        assert_eq!(quote.items.len(), 1);
        assert_eq!(quote.total, 100_000_000);
        assert_eq!(quote.total_sol(), 0.1);
    }

    #[test]
    fn test_authorities_add_up() {
        let mut metadata = TokenMetadata::default();
        metadata.freeze_authority = true;
        metadata.update_authority = true;

        let quote = FeeQuote::for_metadata(&metadata, &FeeSchedule::default());
        assert_eq!(quote.items.len(), 3);
        assert_eq!(quote.items[1].0, "Freeze Authority");
        assert_eq!(quote.total, 300_000_000);
    }

    #[test]
    fn test_total_is_capped() {
        let mut metadata = TokenMetadata::default();
        metadata.freeze_authority = true;
        metadata.mint_authority = true;
        metadata.update_authority = true;
        metadata.modify_creator = true;

        let quote = FeeQuote::for_metadata(&metadata, &FeeSchedule::default());
        assert_eq!(quote.items.len(), 5);
        assert_eq!(quote.total, 500_000_000);
    }
}
