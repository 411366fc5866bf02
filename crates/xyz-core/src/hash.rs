use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, XyzError};

/// Serializes `value` to JSON with object keys in sorted order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, XyzError> {
    let value = serde_json::to_value(value)
        .map_err(|err| XyzError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_vec(&value)
        .map_err(|err| XyzError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, XyzError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
