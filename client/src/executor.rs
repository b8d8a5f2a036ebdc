use skilldao_common::contract::{ContractCall, LedgerContract, Receipt};
use skilldao_common::error::{CertError, CertResult};

use crate::session::Session;

/// Execution budget for a cost estimate: `floor(estimate * 1.2)`.
///
/// Absorbs estimation drift between the dry run and the broadcast.
pub fn execution_budget(estimate: u64) -> u64 {
    let budget = u128::from(estimate) * 12 / 10;
    u64::try_from(budget).unwrap_or(u64::MAX)
}

/// Drives a state-mutating contract call through estimate, submit and confirm.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionExecutor;

impl TransactionExecutor {
    /// Run `call` as the session's identity.
    ///
    /// Fails with `NotConnected` before touching the ledger when there is no
    /// session. Any step's failure ends the run; nothing is retried.
    pub async fn execute<C: LedgerContract>(
        &self,
        call: &ContractCall,
        session: Option<&Session<C>>,
    ) -> CertResult<Receipt> {
        let session = session.ok_or(CertError::NotConnected)?;
        let from = session.identity();
        let contract = session.contract();

        tracing::debug!("Estimating {} from {from}", call.name());
        let estimate = contract.estimate_cost(call, from).await?;
        let gas_limit = execution_budget(estimate);

        tracing::debug!("Submitting {} (estimate {estimate}, limit {gas_limit})", call.name());
        let pending = contract.submit(call, from, gas_limit).await?;

        tracing::debug!("Awaiting confirmation of {}", pending.hash);
        let receipt = contract.confirm(&pending).await?;
        tracing::info!("{} confirmed in tx {}", call.name(), receipt.hash);
        Ok(receipt)
    }
}
