use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use skilldao_common::activity::DEFAULT_ACTIVITY_CAPACITY;
use skilldao_common::notification::NOTIFICATION_TTL_MS;
use skilldao_common::DEFAULT_CONTRACT_ADDRESS;

/// How long to keep asking the ledger for a receipt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_polls: 120,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub contract_address: Address,
    pub confirmation: ConfirmationPolicy,
    pub activity_capacity: usize,
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_address: default_contract_address(),
            confirmation: ConfirmationPolicy::default(),
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            notification_ttl: Duration::from_millis(NOTIFICATION_TTL_MS as u64),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the contract address overridable at compile time via
    /// `SKILLDAO_CONTRACT_ADDRESS`.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(address) = option_env!("SKILLDAO_CONTRACT_ADDRESS")
            .filter(|s| !s.is_empty())
            .and_then(|s| Address::from_str(s).ok())
        {
            config.contract_address = address;
        }
        config
    }
}

fn default_contract_address() -> Address {
    Address::from_str(DEFAULT_CONTRACT_ADDRESS).unwrap_or(Address::ZERO)
}
