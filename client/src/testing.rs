//! In-crate fakes for unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use alloy_primitives::{address, Address, B256, U256};
use skilldao_common::activity::ActivityEntry;
use skilldao_common::certification::{Certification, RawCertification};
use skilldao_common::contract::{ContractCall, LedgerContract, PendingTransaction, Receipt};
use skilldao_common::error::{CertError, CertResult};
use skilldao_common::notification::Notification;
use skilldao_common::stats::PlatformStats;
use skilldao_common::wallet::WalletProvider;

use crate::render::{Form, RenderSurface};

pub fn alice() -> Address {
    address!("00000000000000000000000000000000000a11ce")
}

pub fn bob() -> Address {
    address!("0000000000000000000000000000000000000b0b")
}

#[derive(Default)]
pub struct LedgerState {
    pub calls: Vec<String>,
    pub certifications: BTreeMap<U256, RawCertification>,
    pub estimate: u64,
    pub fail_estimate: bool,
    pub fail_submit: bool,
    pub last_gas_limit: Option<u64>,
}

#[derive(Clone, Default)]
pub struct FakeContract {
    pub state: Rc<RefCell<LedgerState>>,
}

impl LedgerContract for FakeContract {
    async fn estimate_cost(&self, call: &ContractCall, _from: Address) -> CertResult<u64> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("estimate:{}", call.name()));
        if state.fail_estimate {
            return Err(CertError::EstimationFailure("execution reverted".into()));
        }
        Ok(state.estimate)
    }

    async fn submit(
        &self,
        call: &ContractCall,
        _from: Address,
        gas_limit: u64,
    ) -> CertResult<PendingTransaction> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("submit:{}", call.name()));
        state.last_gas_limit = Some(gas_limit);
        if state.fail_submit {
            return Err(CertError::SubmissionRejected("user denied".into()));
        }
        Ok(PendingTransaction { hash: B256::ZERO })
    }

    async fn confirm(&self, pending: &PendingTransaction) -> CertResult<Receipt> {
        self.state.borrow_mut().calls.push("confirm".into());
        Ok(Receipt {
            hash: pending.hash,
            block_number: Some(U256::from(1u64)),
            gas_used: U256::from(21_000u64),
        })
    }

    async fn get_certification(&self, id: U256) -> CertResult<RawCertification> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("get:{id}"));
        state
            .certifications
            .get(&id)
            .cloned()
            .ok_or_else(|| CertError::ReadNotFound("execution reverted".into()))
    }

    async fn total_supply(&self) -> CertResult<U256> {
        let mut state = self.state.borrow_mut();
        state.calls.push("totalSupply".into());
        Ok(U256::from(state.certifications.len()))
    }
}

pub struct FakeWallet {
    pub identities: Vec<Address>,
    pub contract: FakeContract,
}

impl FakeWallet {
    pub fn with_identities(identities: Vec<Address>) -> Self {
        Self {
            identities,
            contract: FakeContract::default(),
        }
    }

    pub fn ledger(&self) -> Rc<RefCell<LedgerState>> {
        Rc::clone(&self.contract.state)
    }
}

impl WalletProvider for FakeWallet {
    type Contract = FakeContract;

    async fn request_identities(&self) -> CertResult<Vec<Address>> {
        Ok(self.identities.clone())
    }

    async fn current_identities(&self) -> CertResult<Vec<Address>> {
        Ok(self.identities.clone())
    }

    async fn balance_of(&self, _identity: Address) -> CertResult<U256> {
        Ok(U256::from(10u64))
    }

    fn bind_contract(&self, _address: Address) -> FakeContract {
        self.contract.clone()
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

/// Records everything pushed to the display.
#[derive(Default)]
pub struct RecordingSurface {
    pub connection: Option<Address>,
    pub balance: Option<String>,
    pub stats: Option<PlatformStats>,
    pub certification: Option<Certification>,
    pub activity: Vec<ActivityEntry>,
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub loading_history: Vec<bool>,
    pub cleared: Vec<Form>,
}

impl RenderSurface for RecordingSurface {
    fn show_connection(&mut self, identity: Option<Address>) {
        self.connection = identity;
    }

    fn show_balance(&mut self, balance: Option<String>) {
        self.balance = balance;
    }

    fn show_stats(&mut self, stats: &PlatformStats) {
        self.stats = Some(stats.clone());
    }

    fn show_certification(&mut self, certification: &Certification) {
        self.certification = Some(certification.clone());
    }

    fn show_activity(&mut self, entries: &[ActivityEntry]) {
        self.activity = entries.to_vec();
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_history.push(loading);
    }

    fn clear_form(&mut self, form: Form) {
        self.cleared.push(form);
    }
}
