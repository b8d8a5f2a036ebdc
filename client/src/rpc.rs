//! EIP-1193 style wallet and contract handles over a JSON-RPC transport.
//!
//! The browser build talks to `window.ethereum`, the CLI to an HTTP node.
//! Both only have to move JSON values; method names, parameter shapes and
//! result decoding live here.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use skilldao_common::abi;
use skilldao_common::certification::RawCertification;
use skilldao_common::contract::{ContractCall, LedgerContract, PendingTransaction, Receipt};
use skilldao_common::error::{CertError, CertResult};
use skilldao_common::wallet::WalletProvider;

use crate::config::ConfirmationPolicy;

/// The user refused the request in the wallet prompt.
pub const USER_REJECTED: i64 = 4001;
/// Generic transport or decoding failure.
pub const INTERNAL_ERROR: i64 = -32603;

/// Error object of a JSON-RPC response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("rpc error {code}: {message}")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: message.into(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED
    }
}

/// Moves a JSON-RPC request to the wallet or node and back.
#[allow(async_fn_in_trait)]
pub trait RpcTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Suspend between receipt polls.
    async fn pause(&self, duration: Duration);
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::internal(e.to_string()))
}

fn provider_error(e: RpcError) -> CertError {
    if e.is_user_rejection() {
        CertError::Provider("user rejected the request".into())
    } else {
        CertError::Provider(e.to_string())
    }
}

/// Wallet provider speaking the standard `eth_*` methods.
#[derive(Clone, Debug)]
pub struct Eip1193Provider<T> {
    transport: T,
    confirmation: ConfirmationPolicy,
    name: String,
}

impl<T: RpcTransport + Clone> Eip1193Provider<T> {
    pub fn new(transport: T, confirmation: ConfirmationPolicy, name: impl Into<String>) -> Self {
        Self {
            transport,
            confirmation,
            name: name.into(),
        }
    }

    async fn accounts(&self, method: &str) -> CertResult<Vec<Address>> {
        let value = self
            .transport
            .request(method, json!([]))
            .await
            .map_err(provider_error)?;
        decode(value).map_err(provider_error)
    }
}

impl<T: RpcTransport + Clone> WalletProvider for Eip1193Provider<T> {
    type Contract = Eip1193Contract<T>;

    async fn request_identities(&self) -> CertResult<Vec<Address>> {
        self.accounts("eth_requestAccounts").await
    }

    async fn current_identities(&self) -> CertResult<Vec<Address>> {
        self.accounts("eth_accounts").await
    }

    async fn balance_of(&self, identity: Address) -> CertResult<U256> {
        let value = self
            .transport
            .request("eth_getBalance", json!([identity, "latest"]))
            .await
            .map_err(provider_error)?;
        decode(value).map_err(provider_error)
    }

    fn bind_contract(&self, address: Address) -> Eip1193Contract<T> {
        Eip1193Contract {
            transport: self.transport.clone(),
            address,
            confirmation: self.confirmation,
        }
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: B256,
    block_number: Option<U256>,
    gas_used: U256,
    #[serde(default)]
    status: Option<U256>,
}

/// The certification contract reached through an [`RpcTransport`].
#[derive(Clone, Debug)]
pub struct Eip1193Contract<T> {
    transport: T,
    address: Address,
    confirmation: ConfirmationPolicy,
}

impl<T: RpcTransport> Eip1193Contract<T> {
    async fn call(&self, data: Bytes) -> Result<Bytes, RpcError> {
        let value = self
            .transport
            .request(
                "eth_call",
                json!([{ "to": self.address, "data": data }, "latest"]),
            )
            .await?;
        decode(value)
    }
}

impl<T: RpcTransport> LedgerContract for Eip1193Contract<T> {
    async fn estimate_cost(&self, call: &ContractCall, from: Address) -> CertResult<u64> {
        let tx = json!({ "from": from, "to": self.address, "data": call.calldata() });
        let value = self
            .transport
            .request("eth_estimateGas", json!([tx]))
            .await
            .map_err(|e| CertError::EstimationFailure(e.to_string()))?;
        let gas: U256 = decode(value).map_err(|e| CertError::EstimationFailure(e.to_string()))?;
        u64::try_from(gas)
            .map_err(|_| CertError::EstimationFailure(format!("estimate {gas} exceeds u64")))
    }

    async fn submit(
        &self,
        call: &ContractCall,
        from: Address,
        gas_limit: u64,
    ) -> CertResult<PendingTransaction> {
        let tx = json!({
            "from": from,
            "to": self.address,
            "data": call.calldata(),
            "gas": format!("{gas_limit:#x}"),
        });
        let value = self
            .transport
            .request("eth_sendTransaction", json!([tx]))
            .await
            .map_err(|e| CertError::SubmissionRejected(e.to_string()))?;
        let hash = decode(value).map_err(|e| CertError::SubmissionRejected(e.to_string()))?;
        Ok(PendingTransaction { hash })
    }

    /// Poll for the receipt until it appears or the policy runs out.
    async fn confirm(&self, pending: &PendingTransaction) -> CertResult<Receipt> {
        let policy = self.confirmation;
        for poll in 0..policy.max_polls {
            if poll > 0 {
                self.transport.pause(policy.poll_interval).await;
            }
            // The transaction is already broadcast; a failed poll only means "not yet".
            let value = match self
                .transport
                .request("eth_getTransactionReceipt", json!([pending.hash]))
                .await
            {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Receipt poll {} for {} failed: {e}", poll + 1, pending.hash);
                    continue;
                }
            };
            if value.is_null() {
                continue;
            }
            let receipt: RpcReceipt = match decode(value) {
                Ok(receipt) => receipt,
                Err(e) => {
                    tracing::warn!("Unreadable receipt for {}: {e}", pending.hash);
                    continue;
                }
            };
            if receipt.status == Some(U256::ZERO) {
                return Err(CertError::SubmissionRejected(format!(
                    "transaction {} reverted",
                    receipt.transaction_hash
                )));
            }
            return Ok(Receipt {
                hash: receipt.transaction_hash,
                block_number: receipt.block_number,
                gas_used: receipt.gas_used,
            });
        }
        tracing::warn!("No receipt for {} after {} polls", pending.hash, policy.max_polls);
        Err(CertError::ConfirmationTimeout {
            polls: policy.max_polls,
        })
    }

    async fn get_certification(&self, id: U256) -> CertResult<RawCertification> {
        let output = self
            .call(abi::encode_get_certification(id))
            .await
            .map_err(|e| CertError::ReadNotFound(e.to_string()))?;
        abi::decode_certification(&output)
    }

    async fn total_supply(&self) -> CertResult<U256> {
        let output = self
            .call(abi::encode_total_supply())
            .await
            .map_err(|e| CertError::ReadNotFound(e.to_string()))?;
        abi::decode_total_supply(&output)
    }
}
