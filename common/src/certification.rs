use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CertError, CertResult};
use crate::format::{format_date, format_id};

/// Ordinal skill level as stored by the contract (1..=4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner = 1,
    Intermediate = 2,
    Advanced = 3,
    Expert = 4,
}

impl SkillLevel {
    pub fn all() -> &'static [SkillLevel] {
        &[
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::Expert,
        ]
    }

    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        match ordinal {
            1 => Some(Self::Beginner),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Advanced),
            4 => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    /// Display name for a raw on-chain level; anything outside 1..=4 is "Unknown".
    pub fn name_of(raw: U256) -> &'static str {
        u64::try_from(raw)
            .ok()
            .and_then(Self::from_ordinal)
            .map(Self::label)
            .unwrap_or("Unknown")
    }
}

/// The tuple returned by the contract's `getCertification`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCertification {
    pub owner: Address,
    pub skill_name: String,
    pub level: U256,
    pub description: String,
    pub endorsements: U256,
    pub timestamp: U256,
}

/// Read-only client projection of a certification held by the ledger contract.
///
/// The contract is the only authority; this value is rebuilt on every lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub id: U256,
    pub owner: Address,
    pub skill_name: String,
    /// Raw ordinal, kept so out-of-range values still render as "Unknown".
    pub level: U256,
    pub description: String,
    pub endorsement_count: U256,
    pub created_at: DateTime<Utc>,
}

impl Certification {
    /// Project a raw contract tuple into the client shape.
    ///
    /// A zero owner means the contract handed back an empty slot, which is
    /// reported the same way as a revert.
    pub fn project(id: U256, raw: RawCertification) -> CertResult<Self> {
        if raw.owner == Address::ZERO {
            return Err(CertError::ReadNotFound(format!("certification #{id} has no owner")));
        }
        let created_at = i64::try_from(raw.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| {
                CertError::ReadNotFound(format!("certification #{id} has a malformed timestamp"))
            })?;
        Ok(Self {
            id,
            owner: raw.owner,
            skill_name: raw.skill_name,
            level: raw.level,
            description: raw.description,
            endorsement_count: raw.endorsements,
            created_at,
        })
    }

    pub fn level_name(&self) -> &'static str {
        SkillLevel::name_of(self.level)
    }

    /// Labelled rows for the certification detail panel.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Certification ID", format_id(self.id)),
            ("Owner", self.owner.to_checksum(None)),
            ("Skill", self.skill_name.clone()),
            ("Level", self.level_name().to_string()),
            ("Description", self.description.clone()),
            ("Endorsements", self.endorsement_count.to_string()),
            ("Created", format_date(&self.created_at)),
        ]
    }
}
