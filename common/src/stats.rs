use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Platform counters shown in the header.
///
/// Only `total_certifications` comes from the contract. The other two are
/// rough estimates scaled from it; the contract does not expose them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_certifications: U256,
    pub estimated_endorsements: U256,
    pub estimated_validators: U256,
}

impl PlatformStats {
    pub fn from_total_supply(total: U256) -> Self {
        Self {
            total_certifications: total,
            // floor(total * 2.3) and floor(total * 0.7)
            estimated_endorsements: total.saturating_mul(U256::from(23u64)) / U256::from(10u64),
            estimated_validators: total.saturating_mul(U256::from(7u64)) / U256::from(10u64),
        }
    }
}
