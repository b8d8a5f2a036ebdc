//! Interface descriptor for the certification contract: the four functions
//! the client calls, their calldata encoding, and return-data decoding.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Bytes, U256};

use crate::certification::RawCertification;
use crate::error::{CertError, CertResult};
use crate::validation::{CertifyRequest, EndorseRequest};

pub const CREATE_CERTIFICATION: &str = "createCertification(string,uint256,string)";
pub const ENDORSE_SKILL: &str = "endorseSkill(uint256,string)";
pub const GET_CERTIFICATION: &str = "getCertification(uint256)";
pub const TOTAL_SUPPLY: &str = "totalSupply()";

/// First four bytes of the keccak hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn calldata(signature: &str, args: Vec<DynSolValue>) -> Bytes {
    let mut data = selector(signature).to_vec();
    if !args.is_empty() {
        data.extend(DynSolValue::Tuple(args).abi_encode_params());
    }
    Bytes::from(data)
}

pub fn encode_create_certification(req: &CertifyRequest) -> Bytes {
    calldata(
        CREATE_CERTIFICATION,
        vec![
            DynSolValue::String(req.skill_name.clone()),
            DynSolValue::Uint(U256::from(req.level.ordinal()), 256),
            DynSolValue::String(req.description.clone()),
        ],
    )
}

pub fn encode_endorse_skill(req: &EndorseRequest) -> Bytes {
    calldata(
        ENDORSE_SKILL,
        vec![
            DynSolValue::Uint(req.certification_id, 256),
            DynSolValue::String(req.message.clone()),
        ],
    )
}

pub fn encode_get_certification(id: U256) -> Bytes {
    calldata(GET_CERTIFICATION, vec![DynSolValue::Uint(id, 256)])
}

pub fn encode_total_supply() -> Bytes {
    calldata(TOTAL_SUPPLY, Vec::new())
}

fn certification_type() -> DynSolType {
    DynSolType::Tuple(vec![
        DynSolType::Address,
        DynSolType::String,
        DynSolType::Uint(256),
        DynSolType::String,
        DynSolType::Uint(256),
        DynSolType::Uint(256),
    ])
}

/// Decode `getCertification` return data.
pub fn decode_certification(data: &[u8]) -> CertResult<RawCertification> {
    let decoded = certification_type()
        .abi_decode_params(data)
        .map_err(|e| CertError::ReadNotFound(format!("undecodable certification: {e}")))?;

    let DynSolValue::Tuple(fields) = decoded else {
        return Err(CertError::ReadNotFound("certification is not a tuple".into()));
    };
    match fields.as_slice() {
        [DynSolValue::Address(owner), DynSolValue::String(skill_name), DynSolValue::Uint(level, _), DynSolValue::String(description), DynSolValue::Uint(endorsements, _), DynSolValue::Uint(timestamp, _)] => {
            Ok(RawCertification {
                owner: *owner,
                skill_name: skill_name.clone(),
                level: *level,
                description: description.clone(),
                endorsements: *endorsements,
                timestamp: *timestamp,
            })
        }
        _ => Err(CertError::ReadNotFound(
            "certification has unexpected fields".into(),
        )),
    }
}

/// Decode `totalSupply` return data.
pub fn decode_total_supply(data: &[u8]) -> CertResult<U256> {
    match DynSolType::Uint(256).abi_decode(data) {
        Ok(DynSolValue::Uint(total, _)) => Ok(total),
        Ok(_) => Err(CertError::ReadNotFound("totalSupply is not a uint".into())),
        Err(e) => Err(CertError::ReadNotFound(format!("undecodable totalSupply: {e}"))),
    }
}
