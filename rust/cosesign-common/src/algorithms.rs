// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! IANA COSE algorithm registry.
//!
//! Positive ids belong to first-layer structures (COSE_Sign, COSE_Mac, ...);
//! negative ids belong to second-layer structures such as COSE_Signature.
//! Only the signature algorithms carry a hash and key parameters.

use std::fmt;

use sha2::Digest;

use crate::error::{CoseError, Result};
use crate::header_map::HeaderValue;

pub type AlgId = i64;

pub const ES256: AlgId = -7;
pub const ES384: AlgId = -35;
pub const ES512: AlgId = -36;
pub const PS256: AlgId = -37;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => sha2::Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
        }
    }

    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipticCurve {
    P256,
    P384,
    P521,
}

impl EllipticCurve {
    /// Byte width of one scalar (r or s) in a COSE ECDSA signature.
    pub fn field_size_bytes(self) -> usize {
        match self {
            EllipticCurve::P256 => 32,
            EllipticCurve::P384 => 48,
            EllipticCurve::P521 => 66,
        }
    }
}

impl fmt::Display for EllipticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EllipticCurve::P256 => "P-256",
            EllipticCurve::P384 => "P-384",
            EllipticCurve::P521 => "P-521",
        })
    }
}

/// Key material a signer for this algorithm must be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyParams {
    Ec(EllipticCurve),
    Rsa { min_bits: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Algorithm {
    pub name: &'static str,
    pub id: AlgId,
    pub hash: Option<HashAlgorithm>,
    pub key: Option<KeyParams>,
}

const fn plain(name: &'static str, id: AlgId) -> Algorithm {
    Algorithm {
        name,
        id,
        hash: None,
        key: None,
    }
}

static ALGORITHMS: &[Algorithm] = &[
    plain("RSAES-OAEP w/ SHA-512", -42),
    plain("RSAES-OAEP w/ SHA-256", -41),
    plain("RSAES-OAEP w/ RFC 8017 default parameters", -40),
    plain("PS512", -39),
    plain("PS384", -38),
    Algorithm {
        name: "PS256",
        id: PS256,
        hash: Some(HashAlgorithm::Sha256),
        key: Some(KeyParams::Rsa { min_bits: 2048 }),
    },
    Algorithm {
        name: "ES512",
        id: ES512,
        hash: Some(HashAlgorithm::Sha512),
        key: Some(KeyParams::Ec(EllipticCurve::P521)),
    },
    Algorithm {
        name: "ES384",
        id: ES384,
        hash: Some(HashAlgorithm::Sha384),
        key: Some(KeyParams::Ec(EllipticCurve::P384)),
    },
    plain("ECDH-SS + A256KW", -34),
    plain("ECDH-SS + A192KW", -33),
    plain("ECDH-SS + A128KW", -32),
    plain("ECDH-ES + A256KW", -31),
    plain("ECDH-ES + A192KW", -30),
    plain("ECDH-ES + A128KW", -29),
    plain("ECDH-SS + HKDF-512", -28),
    plain("ECDH-SS + HKDF-256", -27),
    plain("ECDH-ES + HKDF-512", -26),
    plain("ECDH-ES + HKDF-256", -25),
    plain("direct+HKDF-AES-256", -13),
    plain("direct+HKDF-AES-128", -12),
    plain("direct+HKDF-SHA-512", -11),
    plain("direct+HKDF-SHA-256", -10),
    plain("EdDSA", -8),
    Algorithm {
        name: "ES256",
        id: ES256,
        hash: Some(HashAlgorithm::Sha256),
        key: Some(KeyParams::Ec(EllipticCurve::P256)),
    },
    plain("direct", -6),
    plain("A256KW", -5),
    plain("A192KW", -4),
    plain("A128KW", -3),
    plain("A128GCM", 1),
    plain("A192GCM", 2),
    plain("A256GCM", 3),
    plain("HMAC 256/64", 4),
    plain("HMAC 256/256", 5),
    plain("HMAC 384/384", 6),
    plain("HMAC 512/512", 7),
    plain("AES-CCM-16-64-128", 10),
    plain("AES-CCM-16-64-256", 11),
    plain("AES-CCM-64-64-128", 12),
    plain("AES-CCM-64-64-256", 13),
    plain("AES-MAC 128/64", 14),
    plain("AES-MAC 256/64", 15),
    plain("ChaCha20/Poly1305", 24),
    plain("AES-MAC 128/128", 25),
    plain("AES-MAC 256/128", 26),
    plain("AES-CCM-16-128-128", 30),
    plain("AES-CCM-16-128-256", 31),
    plain("AES-CCM-64-128-128", 32),
    plain("AES-CCM-64-128-256", 33),
];

impl Algorithm {
    pub fn all() -> &'static [Algorithm] {
        ALGORITHMS
    }

    pub fn by_name(name: &str) -> Result<&'static Algorithm> {
        ALGORITHMS
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| CoseError::AlgorithmNameNotFound(name.to_string()))
    }

    pub fn by_id(id: AlgId) -> Result<&'static Algorithm> {
        ALGORITHMS
            .iter()
            .find(|a| a.id == id)
            .ok_or(CoseError::AlgorithmIdNotFound(i128::from(id)))
    }

    /// Resolve an `alg` header value: text by name, integers by id.
    pub fn from_header_value(value: &HeaderValue) -> Result<&'static Algorithm> {
        match value {
            HeaderValue::Text(name) => Self::by_name(name),
            HeaderValue::Int(id) => Self::by_id(*id),
            HeaderValue::UInt(u) => Err(CoseError::AlgorithmIdNotFound(i128::from(*u))),
            _ => Err(CoseError::AlgNotFound),
        }
    }

    pub fn hash_algorithm(&self) -> Result<HashAlgorithm> {
        self.hash.ok_or(CoseError::HashUnavailable(self.name))
    }

    pub fn curve(&self) -> Option<EllipticCurve> {
        match self.key {
            Some(KeyParams::Ec(curve)) => Some(curve),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
