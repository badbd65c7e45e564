// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a certificate's DER encoding, as uppercase hex
/// without separators. This is the certificate's identity in the trusted
/// list.
pub fn sha256_fingerprint(der: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(der))
}

/// Canonicalizes an externally supplied fingerprint for comparison:
/// `:` and space separators stripped, uppercased.
///
/// Trusted-root matching is exact-match over canonical digests, never
/// substring or prefix matching.
pub fn normalize_fingerprint(fingerprint: &str) -> String {
    fingerprint
        .chars()
        .filter(|c| !matches!(c, ':' | ' '))
        .collect::<String>()
        .to_ascii_uppercase()
}
