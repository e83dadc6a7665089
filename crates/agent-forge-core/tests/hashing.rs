// crates/agent-forge-core/tests/hashing.rs
// ============================================================================
// Module: Canonical Hashing Tests
// Description: Verifies RFC 8785 canonical JSON hashing behavior.
// ============================================================================
//! ## Overview
//! Ensures canonical JSON hashing is deterministic across key ordering and
//! numeric representation, rejects non-finite floats, and enforces the
//! caller-supplied size limit at its exact boundary.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use agent_forge_core::HashAlgorithm;
use agent_forge_core::hashing::HashError;
use agent_forge_core::hashing::canonical_json_bytes;
use agent_forge_core::hashing::canonical_json_bytes_with_limit;
use agent_forge_core::hashing::hash_bytes;
use agent_forge_core::hashing::hash_canonical_json;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

#[test]
fn hash_bytes_matches_known_sha256_vectors() {
    let empty = hash_bytes(HashAlgorithm::Sha256, b"");
    assert_eq!(
        empty.value,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let abc = hash_bytes(HashAlgorithm::Sha256, b"abc");
    assert_eq!(
        abc.value,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(abc.algorithm.as_str(), "sha256");
}

#[test]
fn canonical_hash_is_order_independent_for_maps() {
    let mut map_a = Map::new();
    map_a.insert("b".to_string(), json!(2));
    map_a.insert("a".to_string(), json!(1));

    let mut map_b = Map::new();
    map_b.insert("a".to_string(), json!(1));
    map_b.insert("b".to_string(), json!(2));

    let hash_a =
        hash_canonical_json(HashAlgorithm::Sha256, &Value::Object(map_a)).expect("hash a");
    let hash_b =
        hash_canonical_json(HashAlgorithm::Sha256, &Value::Object(map_b)).expect("hash b");

    assert_eq!(hash_a, hash_b);
}

#[test]
fn canonical_hash_normalizes_numeric_representation() {
    let hash_float = hash_canonical_json(HashAlgorithm::Sha256, &json!(1.0)).expect("hash float");
    let hash_int = hash_canonical_json(HashAlgorithm::Sha256, &json!(1)).expect("hash int");

    assert_eq!(hash_float, hash_int);
}

#[derive(Serialize)]
struct FloatWrapper {
    value: f64,
}

#[test]
fn canonical_hash_rejects_nan() {
    let value = FloatWrapper { value: f64::NAN };
    let err = hash_canonical_json(HashAlgorithm::Sha256, &value).unwrap_err();
    assert!(matches!(err, HashError::Canonicalization(_)));
}

#[test]
fn canonical_hash_rejects_infinity() {
    let value = FloatWrapper {
        value: f64::INFINITY,
    };
    let err = hash_canonical_json(HashAlgorithm::Sha256, &value).unwrap_err();
    assert!(matches!(err, HashError::Canonicalization(_)));
}

#[test]
fn canonical_hash_rejects_negative_infinity() {
    let value = FloatWrapper {
        value: f64::NEG_INFINITY,
    };
    let err = hash_canonical_json(HashAlgorithm::Sha256, &value).unwrap_err();
    assert!(matches!(err, HashError::Canonicalization(_)));
}

#[test]
fn size_limit_exact_boundary_passes() {
    let value = json!({"a": 1});
    let canonical = canonical_json_bytes(&value).expect("canonical bytes");

    let bytes = canonical_json_bytes_with_limit(&value, canonical.len()).expect("at limit");
    assert_eq!(bytes, canonical);
}

#[test]
fn size_limit_one_byte_under_fails() {
    let value = json!({"a": 1});
    let canonical = canonical_json_bytes(&value).expect("canonical bytes");

    let err = canonical_json_bytes_with_limit(&value, canonical.len() - 1).unwrap_err();
    let HashError::OutputTooLarge {
        max_bytes,
        actual_bytes,
    } = err
    else {
        panic!("expected OutputTooLarge, got {err}");
    };
    assert_eq!(max_bytes, canonical.len() - 1);
    assert_eq!(actual_bytes, canonical.len());
}

#[test]
fn size_limit_zero_rejects_all() {
    let err = canonical_json_bytes_with_limit(&json!({}), 0).unwrap_err();
    assert!(matches!(err, HashError::OutputTooLarge { .. }));
}

#[test]
fn digest_serializes_with_lowercase_algorithm_label() {
    let digest = hash_bytes(HashAlgorithm::Sha256, b"abc");
    let value = serde_json::to_value(&digest).expect("serialize digest");

    assert_eq!(value["algorithm"], json!("sha256"));
    assert_eq!(value["value"], json!(digest.value));
}

#[test]
fn canonical_form_sorts_keys_lexicographically() {
    let mut map = Map::new();
    map.insert("zeta".to_string(), json!(1));
    map.insert("alpha".to_string(), json!(2));

    let bytes = canonical_json_bytes(&Value::Object(map)).expect("canonical bytes");
    let text = String::from_utf8(bytes).expect("utf8");
    assert_eq!(text, r#"{"alpha":2,"zeta":1}"#);
}
