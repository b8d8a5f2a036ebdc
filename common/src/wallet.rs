use alloy_primitives::{Address, U256};

use crate::contract::LedgerContract;
use crate::error::CertResult;

/// An injected wallet (EIP-1193 style) that authorizes identities and signs
/// for them.
///
/// Failures are reported as `CertError::Provider`, except for a user refusing
/// the account request, which implementations may also report that way.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    type Contract: LedgerContract;

    /// Ask the user to authorize identities. May prompt.
    async fn request_identities(&self) -> CertResult<Vec<Address>>;

    /// Identities already authorized for this page. Never prompts.
    async fn current_identities(&self) -> CertResult<Vec<Address>>;

    /// Native-token balance of `identity`, in wei.
    async fn balance_of(&self, identity: Address) -> CertResult<U256>;

    /// Open a contract handle at `address` that sends through this wallet.
    fn bind_contract(&self, address: Address) -> Self::Contract;

    /// Human-readable provider name (e.g. "metamask", "json-rpc").
    fn provider_name(&self) -> &str;
}
