use alloy_primitives::{Address, U256};
use skilldao_common::certification::Certification;
use skilldao_common::contract::LedgerContract;
use skilldao_common::error::{CertError, CertResult};
use skilldao_common::validation::{validate_verify_key, LookupKey};

/// Result of a verification lookup that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Found(Certification),
    /// Owner lookups are not offered; reported as informational, never queried.
    AddressLookupUnavailable(Address),
}

/// Resolves a lookup key to a read-only contract query.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerificationDispatcher;

impl VerificationDispatcher {
    pub fn classify(&self, key: &str) -> CertResult<LookupKey> {
        validate_verify_key(key)
    }

    pub async fn verify<C: LedgerContract>(
        &self,
        key: &str,
        contract: Option<&C>,
    ) -> CertResult<Verification> {
        let key = self.classify(key)?;
        self.resolve(&key, contract).await
    }

    /// Query the contract for a classified key.
    ///
    /// Every read failure is reported as `ReadNotFound`: a missing id and a
    /// malformed on-chain record look the same to the caller.
    pub async fn resolve<C: LedgerContract>(
        &self,
        key: &LookupKey,
        contract: Option<&C>,
    ) -> CertResult<Verification> {
        let digits = match key {
            LookupKey::Address(owner) => {
                tracing::debug!("Owner lookup requested for {owner}");
                return Ok(Verification::AddressLookupUnavailable(*owner));
            }
            LookupKey::NumericId(digits) => digits,
        };
        let contract = contract.ok_or(CertError::NotConnected)?;

        let id = U256::from_str_radix(digits, 10)
            .map_err(|_| CertError::ReadNotFound(format!("id {digits} is out of range")))?;

        tracing::debug!("Reading certification #{id}");
        let raw = contract
            .get_certification(id)
            .await
            .map_err(|e| match e {
                CertError::ReadNotFound(_) => e,
                other => CertError::ReadNotFound(other.to_string()),
            })?;
        Certification::project(id, raw).map(Verification::Found)
    }
}
