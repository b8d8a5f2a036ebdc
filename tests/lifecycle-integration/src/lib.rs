use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use serde::Deserialize;
use serde_json::{json, Value};

use skilldao_client::rpc::{RpcError, RpcTransport, USER_REJECTED};
use skilldao_common::abi;

pub mod harness;

/// Gas the in-memory node quotes for `createCertification`.
pub const CREATE_GAS: u64 = 150_000;
/// Gas the in-memory node quotes for `endorseSkill`.
pub const ENDORSE_GAS: u64 = 80_000;
/// Balance every dummy identity starts with: 1.5 ETH.
pub const STARTING_BALANCE_WEI: u128 = 1_500_000_000_000_000_000;

const REVERTED: i64 = 3;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic identity derived from a display name.
pub fn make_dummy_identity(name: &str) -> Address {
    Address::from_slice(&keccak256(name.to_lowercase().as_bytes())[12..])
}

/// A certification as the in-memory contract stores it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredCertification {
    pub owner: Address,
    pub skill_name: String,
    pub level: U256,
    pub description: String,
    pub endorsements: U256,
    pub timestamp: U256,
}

/// Knobs and counters of the in-memory node.
#[derive(Debug, Default)]
pub struct NodeState {
    pub accounts: Vec<Address>,
    pub authorized: bool,
    pub reject_connect: bool,
    pub fail_estimate: bool,
    pub reject_send: bool,
    /// Mine transactions with a failed status.
    pub revert_on_chain: bool,
    /// Receipt polls answered with `null` before a transaction is mined.
    pub mining_delay: u32,
    pub never_mine: bool,
    /// Certification ids start at 1.
    pub certifications: Vec<StoredCertification>,
    pub requests: Vec<String>,
    pub pauses: u32,
    pub last_gas: Option<u64>,
    receipts: HashMap<B256, (u32, Value)>,
    nonce: u64,
}

impl NodeState {
    pub fn count(&self, method: &str) -> usize {
        self.requests.iter().filter(|m| *m == method).count()
    }

    pub fn certification(&self, id: u64) -> Option<&StoredCertification> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.certifications.get(index)
    }
}

#[derive(Deserialize)]
struct TxRequest {
    from: Address,
    to: Address,
    data: Bytes,
    #[serde(default)]
    gas: Option<U256>,
}

enum Mutation {
    Create {
        skill_name: String,
        level: U256,
        description: String,
    },
    Endorse {
        id: U256,
    },
}

fn reverted(reason: &str) -> RpcError {
    RpcError {
        code: REVERTED,
        message: format!("execution reverted: {reason}"),
    }
}

fn invalid(message: impl Into<String>) -> RpcError {
    RpcError::internal(message)
}

fn quantity(value: impl Into<U256>) -> Value {
    json!(format!("{:#x}", value.into()))
}

/// An EIP-1193 endpoint backed by an in-memory certification contract.
///
/// Single-threaded: clones share state, which is how the harness inspects
/// what the client sent.
#[derive(Clone, Debug, Default)]
pub struct MemoryNode {
    state: Rc<RefCell<NodeState>>,
}

impl MemoryNode {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        let node = Self::default();
        node.state.borrow_mut().accounts = accounts;
        node
    }

    pub fn state(&self) -> std::cell::Ref<'_, NodeState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> std::cell::RefMut<'_, NodeState> {
        self.state.borrow_mut()
    }

    /// Store a certification directly, as if another client had created it.
    pub fn seed_certification(&self, cert: StoredCertification) -> U256 {
        let mut state = self.state.borrow_mut();
        state.certifications.push(cert);
        U256::from(state.certifications.len())
    }

    fn tx_param(params: &Value) -> Result<TxRequest, RpcError> {
        serde_json::from_value(params[0].clone()).map_err(|e| invalid(e.to_string()))
    }

    fn decode_mutation(&self, data: &[u8]) -> Result<Mutation, RpcError> {
        let (selector, args) = data
            .split_first_chunk::<4>()
            .ok_or_else(|| invalid("calldata shorter than a selector"))?;

        if *selector == abi::selector(abi::CREATE_CERTIFICATION) {
            let ty = DynSolType::Tuple(vec![
                DynSolType::String,
                DynSolType::Uint(256),
                DynSolType::String,
            ]);
            let decoded = ty.abi_decode_params(args).map_err(|e| invalid(e.to_string()))?;
            match decoded.as_tuple() {
                Some(
                    [DynSolValue::String(skill_name), DynSolValue::Uint(level, _), DynSolValue::String(description)],
                ) => {
                    if skill_name.is_empty() || description.is_empty() {
                        return Err(reverted("empty field"));
                    }
                    if *level < U256::from(1u64) || *level > U256::from(4u64) {
                        return Err(reverted("invalid level"));
                    }
                    Ok(Mutation::Create {
                        skill_name: skill_name.clone(),
                        level: *level,
                        description: description.clone(),
                    })
                }
                _ => Err(invalid("unexpected createCertification arguments")),
            }
        } else if *selector == abi::selector(abi::ENDORSE_SKILL) {
            let ty = DynSolType::Tuple(vec![DynSolType::Uint(256), DynSolType::String]);
            let decoded = ty.abi_decode_params(args).map_err(|e| invalid(e.to_string()))?;
            match decoded.as_tuple() {
                Some([DynSolValue::Uint(id, _), DynSolValue::String(_)]) => {
                    let exists = u64::try_from(*id)
                        .ok()
                        .and_then(|id| self.state.borrow().certification(id).cloned())
                        .is_some();
                    if !exists {
                        return Err(reverted("certification does not exist"));
                    }
                    Ok(Mutation::Endorse { id: *id })
                }
                _ => Err(invalid("unexpected endorseSkill arguments")),
            }
        } else {
            Err(reverted("unknown selector"))
        }
    }

    fn apply(&self, from: Address, mutation: Mutation) {
        let mut state = self.state.borrow_mut();
        match mutation {
            Mutation::Create {
                skill_name,
                level,
                description,
            } => state.certifications.push(StoredCertification {
                owner: from,
                skill_name,
                level,
                description,
                endorsements: U256::ZERO,
                timestamp: U256::from(chrono::Utc::now().timestamp().unsigned_abs()),
            }),
            Mutation::Endorse { id } => {
                let index = usize::try_from(id).unwrap_or(usize::MAX).saturating_sub(1);
                if let Some(cert) = state.certifications.get_mut(index) {
                    cert.endorsements += U256::from(1u64);
                }
            }
        }
    }

    fn gas_for(mutation: &Mutation) -> u64 {
        match mutation {
            Mutation::Create { .. } => CREATE_GAS,
            Mutation::Endorse { .. } => ENDORSE_GAS,
        }
    }

    fn accounts(&self, prompt: bool) -> Result<Value, RpcError> {
        let mut state = self.state.borrow_mut();
        if prompt {
            if state.reject_connect {
                return Err(RpcError {
                    code: USER_REJECTED,
                    message: "User rejected the request.".into(),
                });
            }
            state.authorized = true;
        }
        if state.authorized {
            Ok(json!(state.accounts))
        } else {
            Ok(json!([]))
        }
    }

    fn estimate(&self, params: &Value) -> Result<Value, RpcError> {
        if self.state.borrow().fail_estimate {
            return Err(reverted("estimation disabled"));
        }
        let tx = Self::tx_param(params)?;
        let mutation = self.decode_mutation(&tx.data)?;
        Ok(quantity(U256::from(Self::gas_for(&mutation))))
    }

    fn send(&self, params: &Value) -> Result<Value, RpcError> {
        if self.state.borrow().reject_send {
            return Err(RpcError {
                code: USER_REJECTED,
                message: "User denied transaction signature.".into(),
            });
        }
        let tx = Self::tx_param(params)?;
        let mutation = self.decode_mutation(&tx.data)?;
        let needed = Self::gas_for(&mutation);
        let gas = tx
            .gas
            .and_then(|g| u64::try_from(g).ok())
            .unwrap_or(needed);
        self.state.borrow_mut().last_gas = Some(gas);
        if gas < needed {
            return Err(invalid("intrinsic gas too low"));
        }

        let success = !self.state.borrow().revert_on_chain;
        if success {
            self.apply(tx.from, mutation);
        }

        let mut state = self.state.borrow_mut();
        state.nonce += 1;
        let nonce = state.nonce.to_be_bytes();
        let hash = keccak256([tx.from.as_slice(), tx.to.as_slice(), &nonce[..]].concat());
        let block = state.nonce;
        let status = if success { "0x1" } else { "0x0" };
        let receipt = json!({
            "transactionHash": hash,
            "blockNumber": quantity(U256::from(block)),
            "gasUsed": quantity(U256::from(needed)),
            "status": status,
        });
        let delay = state.mining_delay;
        state.receipts.insert(hash, (delay, receipt));
        Ok(json!(hash))
    }

    fn receipt(&self, params: &Value) -> Result<Value, RpcError> {
        let hash: B256 =
            serde_json::from_value(params[0].clone()).map_err(|e| invalid(e.to_string()))?;
        let mut state = self.state.borrow_mut();
        if state.never_mine {
            return Ok(Value::Null);
        }
        match state.receipts.get_mut(&hash) {
            Some((0, receipt)) => Ok(receipt.clone()),
            Some((remaining, _)) => {
                *remaining -= 1;
                Ok(Value::Null)
            }
            None => Ok(Value::Null),
        }
    }

    fn call(&self, params: &Value) -> Result<Value, RpcError> {
        let data: Bytes =
            serde_json::from_value(params[0]["data"].clone()).map_err(|e| invalid(e.to_string()))?;
        let (selector, args) = data
            .split_first_chunk::<4>()
            .ok_or_else(|| invalid("calldata shorter than a selector"))?;
        let state = self.state.borrow();

        if *selector == abi::selector(abi::TOTAL_SUPPLY) {
            let total = U256::from(state.certifications.len());
            return Ok(json!(Bytes::from(DynSolValue::Uint(total, 256).abi_encode())));
        }
        if *selector == abi::selector(abi::GET_CERTIFICATION) {
            let id = match DynSolType::Uint(256).abi_decode(args) {
                Ok(DynSolValue::Uint(id, _)) => id,
                _ => return Err(invalid("bad getCertification argument")),
            };
            let cert = u64::try_from(id)
                .ok()
                .and_then(|id| state.certification(id))
                .ok_or_else(|| reverted("certification does not exist"))?;
            let encoded = DynSolValue::Tuple(vec![
                DynSolValue::Address(cert.owner),
                DynSolValue::String(cert.skill_name.clone()),
                DynSolValue::Uint(cert.level, 256),
                DynSolValue::String(cert.description.clone()),
                DynSolValue::Uint(cert.endorsements, 256),
                DynSolValue::Uint(cert.timestamp, 256),
            ])
            .abi_encode_params();
            return Ok(json!(Bytes::from(encoded)));
        }
        Err(reverted("unknown selector"))
    }
}

impl RpcTransport for MemoryNode {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.state.borrow_mut().requests.push(method.to_string());
        tracing::debug!("memory node <- {method} {params}");
        match method {
            "eth_requestAccounts" => self.accounts(true),
            "eth_accounts" => self.accounts(false),
            "eth_getBalance" => Ok(quantity(U256::from(STARTING_BALANCE_WEI))),
            "eth_estimateGas" => self.estimate(&params),
            "eth_sendTransaction" => self.send(&params),
            "eth_getTransactionReceipt" => self.receipt(&params),
            "eth_call" => self.call(&params),
            other => Err(RpcError {
                code: -32601,
                message: format!("method {other} not found"),
            }),
        }
    }

    async fn pause(&self, _duration: Duration) {
        self.state.borrow_mut().pauses += 1;
    }
}

/// A certification seeded on the node, owned by `owner`.
pub fn make_dummy_certification(owner: Address, skill_name: &str, level: u64) -> StoredCertification {
    StoredCertification {
        owner,
        skill_name: skill_name.to_string(),
        level: U256::from(level),
        description: format!("{skill_name} in production"),
        endorsements: U256::ZERO,
        timestamp: U256::from(1_700_000_000u64),
    }
}
