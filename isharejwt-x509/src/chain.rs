// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use isharejwt_validation::RejectionReason;

/// Subject RDN attributes: order-preserving, looked up by attribute type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject(Vec<(String, String)>);

impl Subject {
    /// Value of the first attribute with the given type (e.g. `serialNumber`,
    /// `CN`, `O`).
    pub fn get(&self, attr_type: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == attr_type)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in certificate order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One parsed chain certificate.
///
/// `x509-parser` borrows from the input DER; the fields path validation and
/// signature verification need are copied out into owned storage here.
#[derive(Debug, Clone)]
pub struct ChainCertificate {
    /// The certificate's DER encoding (also its fingerprint input).
    pub der: Vec<u8>,
    /// Subject distinguished name, rendered.
    pub subject_dn: String,
    /// Issuer distinguished name, rendered.
    pub issuer_dn: String,
    /// Subject RDN attributes by type.
    pub subject: Subject,
    /// DER SubjectPublicKeyInfo.
    pub spki_der: Vec<u8>,
    /// Raw subjectPublicKey BIT STRING contents (PKCS#1 DER for RSA keys).
    pub public_key_der: Vec<u8>,
    /// DER TBSCertificate, the bytes the issuer signed.
    pub tbs_der: Vec<u8>,
    /// Certificate signature algorithm OID, dotted.
    pub signature_oid: String,
    /// Certificate signature bytes.
    pub signature: Vec<u8>,
    /// notBefore, unix seconds.
    pub not_before: i64,
    /// notAfter, unix seconds.
    pub not_after: i64,
}

/// Short names for the subject attribute types this profile cares about.
/// Unlisted types keep their dotted OID as the key.
fn rdn_short_name(oid: &str) -> &str {
    match oid {
        "2.5.4.3" => "CN",
        "2.5.4.5" => "serialNumber",
        "2.5.4.6" => "C",
        "2.5.4.7" => "L",
        "2.5.4.8" => "ST",
        "2.5.4.10" => "O",
        "2.5.4.11" => "OU",
        "1.2.840.113549.1.9.1" => "emailAddress",
        other => other,
    }
}

impl ChainCertificate {
    pub fn from_der(der: &[u8]) -> Result<Self, String> {
        let (_, cert) = x509_parser::parse_x509_certificate(der)
            .map_err(|e| format!("invalid certificate DER: {e}"))?;

        let mut attrs = Vec::new();
        for attr in cert.tbs_certificate.subject.iter_attributes() {
            // Non-string attribute values are skipped rather than failing the
            // whole certificate.
            if let Ok(value) = attr.as_str() {
                let oid = attr.attr_type().to_id_string();
                attrs.push((rdn_short_name(&oid).to_string(), value.to_string()));
            }
        }

        Ok(Self {
            der: der.to_vec(),
            subject_dn: cert.tbs_certificate.subject.to_string(),
            issuer_dn: cert.tbs_certificate.issuer.to_string(),
            subject: Subject(attrs),
            spki_der: cert.tbs_certificate.subject_pki.raw.to_vec(),
            public_key_der: cert
                .tbs_certificate
                .subject_pki
                .subject_public_key
                .data
                .to_vec(),
            // `x509-parser` keeps the raw DER for TBSCertificate; expose it via `AsRef`.
            tbs_der: cert.tbs_certificate.as_ref().to_vec(),
            signature_oid: cert.signature_algorithm.algorithm.to_string(),
            signature: cert.signature_value.data.to_vec(),
            not_before: cert.tbs_certificate.validity.not_before.timestamp(),
            not_after: cert.tbs_certificate.validity.not_after.timestamp(),
        })
    }

    /// The subject `serialNumber` attribute, which this profile repurposes to
    /// carry the token issuer's identity. Empty values count as absent.
    pub fn serial_number(&self) -> Option<&str> {
        self.subject.get("serialNumber").filter(|s| !s.is_empty())
    }

    /// True when `now` lies inside the certificate's validity window.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.not_before <= now && now <= self.not_after
    }
}

/// Ordered certificate chain as presented in `x5c`: index 0 is the leaf
/// (the token signer), the last entry is the root.
///
/// The constructor guarantees at least two entries, so `leaf` and `root`
/// always exist and chains of length two have no intermediates.
#[derive(Debug, Clone)]
pub struct CertificateChain {
    certs: Vec<ChainCertificate>,
}

impl CertificateChain {
    /// Assembles the chain from `x5c` entries (base64 DER, leaf first).
    ///
    /// A lone certificate cannot establish trust: at least leaf + root are
    /// required.
    pub fn from_x5c(entries: &[String]) -> Result<Self, RejectionReason> {
        if entries.len() < 2 {
            return Err(RejectionReason::ChainTooShort);
        }

        let mut certs = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let der = BASE64_STANDARD
                .decode(entry.trim())
                .map_err(|_| RejectionReason::InvalidCertificateEncoding(index))?;
            let cert = ChainCertificate::from_der(&der)
                .map_err(|_| RejectionReason::InvalidCertificateEncoding(index))?;
            certs.push(cert);
        }

        Ok(Self { certs })
    }

    pub fn len(&self) -> usize {
        self.certs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }

    /// The token signer's certificate.
    pub fn leaf(&self) -> &ChainCertificate {
        &self.certs[0]
    }

    /// The trust anchor candidate, as presented.
    pub fn root(&self) -> &ChainCertificate {
        &self.certs[self.certs.len() - 1]
    }

    /// Certificates between leaf and root, in presented (leaf-to-root) order.
    pub fn intermediates(&self) -> &[ChainCertificate] {
        &self.certs[1..self.certs.len() - 1]
    }
}
