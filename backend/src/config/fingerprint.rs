//! Configuration fingerprint
//!
//! A SHA-256 over the canonical JSON form of a configuration. Two runs
//! with the same fingerprint used the same parameters (including seed),
//! so their traces must be identical.

use super::SimulationConfig;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute the hex-encoded SHA-256 fingerprint of `config`
pub fn fingerprint(config: &SimulationConfig) -> String {
    // Plain structs always serialize; fall back to Null rather than panic
    let value = serde_json::to_value(config).unwrap_or(Value::Null);
    let canonical = canonicalize(value);

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Recursively sort all object keys
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = SimulationConfig::example();
        let b = SimulationConfig::example();
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_eq!(fingerprint(&a).len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_seed() {
        let a = SimulationConfig::example();
        let mut b = a.clone();
        b.seed += 1;
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}
