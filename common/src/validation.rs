//! Form validation. Everything here is pure: no wallet or ledger access, so
//! a rejected form never costs a network round trip.

use std::str::FromStr;

use alloy_primitives::{Address, U256};

use crate::certification::SkillLevel;
use crate::error::{CertError, CertResult};

/// A validated "create certification" form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertifyRequest {
    pub skill_name: String,
    pub level: SkillLevel,
    pub description: String,
}

/// A validated "endorse" form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndorseRequest {
    pub certification_id: U256,
    pub message: String,
}

/// Shape of a verification lookup key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupKey {
    /// All decimal digits. Kept as text: a value too large for the contract's
    /// id type is simply a certification that does not exist.
    NumericId(String),
    /// `0x` followed by 40 hex digits. Owner lookups are not offered yet.
    Address(Address),
}

fn required<'a>(field: &'static str, value: &'a str) -> CertResult<&'a str> {
    if value.is_empty() {
        Err(CertError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Validate the certify form. Fields are checked in form order.
pub fn validate_certify(
    skill_name: &str,
    level: &str,
    description: &str,
) -> CertResult<CertifyRequest> {
    let skill_name = required("skill_name", skill_name)?;
    let level = required("level", level)?;
    let description = required("description", description)?;

    let level = level
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(SkillLevel::from_ordinal)
        .ok_or_else(|| CertError::InvalidLevel(level.to_string()))?;

    Ok(CertifyRequest {
        skill_name: skill_name.to_string(),
        level,
        description: description.to_string(),
    })
}

/// Validate the endorse form.
pub fn validate_endorse(certification_id: &str, message: &str) -> CertResult<EndorseRequest> {
    let id = required("certification_id", certification_id)?;
    let message = required("message", message)?;

    if !is_decimal(id) {
        return Err(CertError::InvalidCertificationId(id.to_string()));
    }
    let certification_id = U256::from_str_radix(id, 10)
        .map_err(|_| CertError::InvalidCertificationId(id.to_string()))?;

    Ok(EndorseRequest {
        certification_id,
        message: message.to_string(),
    })
}

/// Validate and classify a verification lookup key.
pub fn validate_verify_key(key: &str) -> CertResult<LookupKey> {
    let key = required("key", key)?;
    if is_decimal(key) {
        return Ok(LookupKey::NumericId(key.to_string()));
    }
    if is_address_like(key) {
        return Address::from_str(key)
            .map(LookupKey::Address)
            .map_err(|_| CertError::InvalidKeyFormat(key.to_string()));
    }
    Err(CertError::InvalidKeyFormat(key.to_string()))
}

/// `^\d+$`
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `^0x[0-9a-fA-F]{40}$`
fn is_address_like(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
