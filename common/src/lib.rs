pub mod abi;
pub mod activity;
pub mod certification;
pub mod contract;
pub mod error;
pub mod format;
pub mod notification;
pub mod stats;
pub mod validation;
pub mod wallet;

/// Address of the deployed certification contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xc37AE2323BA365C18c16225C5b5522DD9B0A64B2";
