// crates/agent-forge-core/src/hashing.rs
// ============================================================================
// Module: Canonical Hashing
// Description: Digest helpers for rendered plans and parameter sets.
// Purpose: Provide stable digests for idempotency and summary reporting.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Digest helpers shared by scaffolding and verification. Rendered files are
//! hashed as raw bytes; structured values (plan manifests, parameter sets)
//! are first canonicalized to RFC 8785 JSON so the digest is independent of
//! key ordering and formatting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Hash algorithms supported for digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
}

impl HashAlgorithm {
    /// Returns the lowercase label for this algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

/// Default algorithm used for plan and file digests.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Digest value paired with its algorithm.
///
/// # Invariants
/// - `value` is lowercase hexadecimal of the algorithm's output width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm that produced the digest.
    pub algorithm: HashAlgorithm,
    /// Lowercase hexadecimal digest value.
    pub value: String,
}

/// Errors raised by canonicalization and digesting.
#[derive(Debug, Error)]
pub enum HashError {
    /// Canonical JSON serialization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
    /// Canonical output exceeded the caller's size limit.
    #[error("canonical output exceeds maximum size of {max_bytes} bytes (got {actual_bytes})")]
    OutputTooLarge {
        /// Maximum accepted size in bytes.
        max_bytes: usize,
        /// Actual canonical output size in bytes.
        actual_bytes: usize,
    },
}

/// Hashes raw bytes with the given algorithm.
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> HashDigest {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let digest = Sha256::digest(bytes);
            HashDigest {
                algorithm,
                value: hex_encode(&digest),
            }
        }
    }
}

/// Serializes a value to canonical (RFC 8785) JSON bytes.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Serializes a value to canonical JSON bytes with a size cap.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] when serialization fails and
/// [`HashError::OutputTooLarge`] when the canonical form exceeds `max_bytes`.
pub fn canonical_json_bytes_with_limit<T: Serialize>(
    value: &T,
    max_bytes: usize,
) -> Result<Vec<u8>, HashError> {
    let bytes = canonical_json_bytes(value)?;
    if bytes.len() > max_bytes {
        return Err(HashError::OutputTooLarge {
            max_bytes,
            actual_bytes: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Hashes a value's canonical JSON form.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(hash_bytes(algorithm, &bytes))
}

// ============================================================================
// SECTION: Encoding Helpers
// ============================================================================

/// Lowercase hexadecimal alphabet.
const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Encodes bytes as lowercase hexadecimal.
fn hex_encode(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        encoded.push(char::from(HEX_CHARS[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX_CHARS[usize::from(byte & 0x0f)]));
    }
    encoded
}
