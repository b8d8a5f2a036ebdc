use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::abi;
use crate::certification::RawCertification;
use crate::error::CertResult;
use crate::validation::{CertifyRequest, EndorseRequest};

/// A state-mutating contract operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractCall {
    CreateCertification(CertifyRequest),
    EndorseSkill(EndorseRequest),
}

impl ContractCall {
    pub fn calldata(&self) -> Bytes {
        match self {
            Self::CreateCertification(req) => abi::encode_create_certification(req),
            Self::EndorseSkill(req) => abi::encode_endorse_skill(req),
        }
    }

    /// Contract function name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateCertification(_) => "createCertification",
            Self::EndorseSkill(_) => "endorseSkill",
        }
    }
}

/// A submitted transaction that has not been confirmed yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: B256,
}

/// Ledger acknowledgement of a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub hash: B256,
    pub block_number: Option<U256>,
    pub gas_used: U256,
}

/// Handle to the certification contract at a fixed address.
///
/// Every method is a suspension point. Implementations report failures using
/// the ledger variants of [`CertError`](crate::error::CertError): estimates
/// fail with `EstimationFailure`, submissions and reverted receipts with
/// `SubmissionRejected`, unconfirmed transactions with `ConfirmationTimeout`,
/// and reads with `ReadNotFound`.
#[allow(async_fn_in_trait)]
pub trait LedgerContract {
    /// Dry-run cost of `call` when sent by `from`, in gas units.
    async fn estimate_cost(&self, call: &ContractCall, from: Address) -> CertResult<u64>;

    /// Broadcast `call` from `from` with the given execution budget.
    async fn submit(
        &self,
        call: &ContractCall,
        from: Address,
        gas_limit: u64,
    ) -> CertResult<PendingTransaction>;

    /// Wait until the ledger finalizes a submitted transaction.
    async fn confirm(&self, pending: &PendingTransaction) -> CertResult<Receipt>;

    async fn get_certification(&self, id: U256) -> CertResult<RawCertification>;

    async fn total_supply(&self) -> CertResult<U256>;
}
