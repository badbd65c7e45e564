// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `isharejwt` integration tests.
//!
//! Builds a disposable RSA PKI with `rcgen` and signs tokens with
//! `jsonwebtoken`, so the end-to-end tests run against freshly issued
//! material. RSA key generation is expensive, so the PKI is built once per
//! test binary; tokens are signed per test.

#![allow(dead_code)]

use std::sync::OnceLock;

use base64::engine::general_purpose::{STANDARD as BASE64_STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use isharejwt::{sha256_fingerprint, TrustConfig};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair};
use rsa::pkcs1::EncodeRsaPrivateKey as _;
use rsa::pkcs8::EncodePrivateKey as _;
use rsa::RsaPrivateKey;
use rustls_pki_types::PrivatePkcs8KeyDer;

/// OID of the subject `serialNumber` RDN attribute.
pub const SERIAL_NUMBER_OID: &[u64] = &[2, 5, 4, 5];

pub const LEAF_SERIAL: &str = "EU.EORI.NL809442127";
pub const AUDIENCE: &str = "EU.EORI.NLSATELLITE";

/// Fixed evaluation instant so tokens never age out of the tests.
pub const NOW: i64 = 1_700_000_000;

pub struct CertAuthority {
    pub cert: rcgen::Certificate,
    pub key: KeyPair,
    pub rsa_key: RsaPrivateKey,
}

impl CertAuthority {
    pub fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }

    pub fn pem(&self) -> String {
        self.cert.pem()
    }

    /// Signing key for `jsonwebtoken` (PKCS#1 DER).
    pub fn encoding_key(&self) -> EncodingKey {
        let der = self.rsa_key.to_pkcs1_der().unwrap();
        EncodingKey::from_rsa_der(der.as_bytes())
    }
}

fn rsa_key_pair() -> (RsaPrivateKey, KeyPair) {
    let mut rng = rand::thread_rng();
    let rsa_key = RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let pkcs8 = rsa_key.to_pkcs8_der().unwrap();
    let key = KeyPair::from_pkcs8_der_and_sign_algo(
        &PrivatePkcs8KeyDer::from(pkcs8.as_bytes().to_vec()),
        &rcgen::PKCS_RSA_SHA256,
    )
    .unwrap();
    (rsa_key, key)
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params
}

pub fn make_root(common_name: &str) -> CertAuthority {
    let (rsa_key, key) = rsa_key_pair();
    let cert = ca_params(common_name).self_signed(&key).unwrap();
    CertAuthority { cert, key, rsa_key }
}

pub fn make_intermediate(common_name: &str, issuer: &CertAuthority) -> CertAuthority {
    let (rsa_key, key) = rsa_key_pair();
    let cert = ca_params(common_name)
        .signed_by(&key, &issuer.cert, &issuer.key)
        .unwrap();
    CertAuthority { cert, key, rsa_key }
}

pub fn make_leaf(
    common_name: &str,
    serial_number: Option<&str>,
    issuer: &CertAuthority,
) -> CertAuthority {
    let (rsa_key, key) = rsa_key_pair();
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, common_name);
    if let Some(serial) = serial_number {
        params
            .distinguished_name
            .push(DnType::CustomDnType(SERIAL_NUMBER_OID.to_vec()), serial);
    }
    let cert = params
        .signed_by(&key, &issuer.cert, &issuer.key)
        .unwrap();
    CertAuthority { cert, key, rsa_key }
}

/// The PKI shared by the tests in one binary.
pub struct TestPki {
    /// Self-signed trusted root.
    pub root: CertAuthority,
    /// Intermediate issued by `root`.
    pub intermediate: CertAuthority,
    /// Leaf with the subject serialNumber [`LEAF_SERIAL`], issued by
    /// `intermediate`.
    pub leaf: CertAuthority,
    /// Leaf issued directly by `root` (two-certificate chains).
    pub direct_leaf: CertAuthority,
    /// Leaf with no subject serialNumber, issued by `intermediate`.
    pub anonymous_leaf: CertAuthority,
    /// Self-signed root with the same CN as `root` but different keys.
    pub rogue_root: CertAuthority,
    /// Intermediate with the same CN as `intermediate`, issued by
    /// `rogue_root`.
    pub rogue_intermediate: CertAuthority,
    /// Leaf with the same serialNumber, issued by `rogue_intermediate`.
    pub rogue_leaf: CertAuthority,
}

pub fn test_pki() -> &'static TestPki {
    static PKI: OnceLock<TestPki> = OnceLock::new();
    PKI.get_or_init(|| {
        let root = make_root("Test Root CA");
        let intermediate = make_intermediate("Test Intermediate CA", &root);
        let leaf = make_leaf("Test Party", Some(LEAF_SERIAL), &intermediate);
        let direct_leaf = make_leaf("Direct Party", Some(LEAF_SERIAL), &root);
        let anonymous_leaf = make_leaf("Anonymous Party", None, &intermediate);
        let rogue_root = make_root("Test Root CA");
        let rogue_intermediate = make_intermediate("Test Intermediate CA", &rogue_root);
        let rogue_leaf = make_leaf("Test Party", Some(LEAF_SERIAL), &rogue_intermediate);
        TestPki {
            root,
            intermediate,
            leaf,
            direct_leaf,
            anonymous_leaf,
            rogue_root,
            rogue_intermediate,
            rogue_leaf,
        }
    })
}

/// A config trusting exactly the given root, with the test audience.
pub fn trust_config(root: &CertAuthority) -> TrustConfig {
    TrustConfig::new(AUDIENCE, [sha256_fingerprint(&root.der())])
}

/// Claims for a token that is live at [`NOW`] and addressed to the test
/// audience.
pub fn default_claims() -> serde_json::Value {
    serde_json::json!({
        "iss": LEAF_SERIAL,
        "sub": LEAF_SERIAL,
        "aud": AUDIENCE,
        "exp": NOW + 600,
        "iat": NOW,
        "jti": "7a9f2b4c-0001-4e0e-9e9a-test",
    })
}

/// Signs `claims` with the leaf's key, embedding the chain in `x5c`
/// (leaf-first standard base64 DER).
pub fn sign_token(
    claims: &serde_json::Value,
    signer: &CertAuthority,
    chain_der: &[Vec<u8>],
) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.x5c = Some(
        chain_der
            .iter()
            .map(|der| BASE64_STANDARD.encode(der))
            .collect(),
    );
    jsonwebtoken::encode(&header, claims, &signer.encoding_key()).unwrap()
}

/// A complete, valid token over the leaf → intermediate → root chain.
pub fn valid_token(pki: &TestPki) -> String {
    sign_token(
        &default_claims(),
        &pki.leaf,
        &[pki.leaf.der(), pki.intermediate.der(), pki.root.der()],
    )
}

/// Flips one bit in the signature segment.
pub fn tamper_signature(token: &str) -> String {
    let (head, sig_b64) = token.rsplit_once('.').unwrap();
    let mut sig = URL_SAFE_NO_PAD.decode(sig_b64).unwrap();
    sig[0] ^= 0x01;
    format!("{head}.{}", URL_SAFE_NO_PAD.encode(sig))
}
