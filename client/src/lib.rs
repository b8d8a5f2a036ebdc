//! Client-side certification lifecycle: wallet session, transaction
//! execution, verification lookups and the controller that ties them to a
//! rendering surface.

pub mod config;
pub mod controller;
pub mod executor;
pub mod render;
pub mod rpc;
pub mod session;
pub mod verification;

#[cfg(test)]
mod testing;

pub use config::{ClientConfig, ConfirmationPolicy};
pub use controller::{Operation, SkillDao};
pub use executor::{execution_budget, TransactionExecutor};
pub use render::{Form, LoadingGuard, RenderSurface};
pub use rpc::{Eip1193Contract, Eip1193Provider, RpcError, RpcTransport};
pub use session::{Session, SessionChange, WalletSession};
pub use verification::{Verification, VerificationDispatcher};
