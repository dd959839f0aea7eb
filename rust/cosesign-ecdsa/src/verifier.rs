// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use cosesign_abstractions::{AlgorithmMethod, ByteVerifier};
use cosesign_common::{AlgId, Algorithm, CoseError, EllipticCurve, Result};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::DecodePublicKey;
use signature::hazmat::PrehashVerifier;

#[derive(Clone)]
pub(crate) enum VerifyingKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(p521::ecdsa::VerifyingKey),
}

/// Verifies fixed-width `r || s` signatures for one algorithm and public key.
#[derive(Clone)]
pub struct EcdsaVerifier {
    alg: &'static Algorithm,
    key: VerifyingKey,
}

fn invalid_key(curve: EllipticCurve) -> impl Fn(String) -> CoseError {
    move |e| CoseError::InvalidKey(format!("bad {curve} public key: {e}"))
}

impl EcdsaVerifier {
    pub(crate) fn from_parts(alg: &'static Algorithm, key: VerifyingKey) -> Self {
        Self { alg, key }
    }

    /// Decode a DER SubjectPublicKeyInfo on the curve `alg_name` requires.
    pub fn from_public_key_der(alg_name: &str, der: &[u8]) -> Result<Self> {
        let (alg, curve) = crate::resolve(alg_name)?;
        let bad = invalid_key(curve);

        // Normalize through the curve's public key type, then into the
        // SEC1 point the ECDSA verifying key expects.
        let key = match curve {
            EllipticCurve::P256 => {
                let pk = p256::PublicKey::from_public_key_der(der).map_err(|e| bad(e.to_string()))?;
                let ep = pk.to_encoded_point(false);
                VerifyingKey::P256(
                    p256::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes()).map_err(|e| bad(e.to_string()))?,
                )
            }
            EllipticCurve::P384 => {
                let pk = p384::PublicKey::from_public_key_der(der).map_err(|e| bad(e.to_string()))?;
                let ep = pk.to_encoded_point(false);
                VerifyingKey::P384(
                    p384::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes()).map_err(|e| bad(e.to_string()))?,
                )
            }
            EllipticCurve::P521 => {
                let pk = p521::PublicKey::from_public_key_der(der).map_err(|e| bad(e.to_string()))?;
                let ep = pk.to_encoded_point(false);
                VerifyingKey::P521(
                    p521::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes()).map_err(|e| bad(e.to_string()))?,
                )
            }
        };
        Ok(Self { alg, key })
    }

    /// Decode a SEC1 encoded point on the curve `alg_name` requires.
    pub fn from_sec1_bytes(alg_name: &str, point: &[u8]) -> Result<Self> {
        let (alg, curve) = crate::resolve(alg_name)?;
        let bad = invalid_key(curve);
        let key = match curve {
            EllipticCurve::P256 => VerifyingKey::P256(
                p256::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(|e| bad(e.to_string()))?,
            ),
            EllipticCurve::P384 => VerifyingKey::P384(
                p384::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(|e| bad(e.to_string()))?,
            ),
            EllipticCurve::P521 => VerifyingKey::P521(
                p521::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(|e| bad(e.to_string()))?,
            ),
        };
        Ok(Self { alg, key })
    }

    /// Uncompressed SEC1 encoding of the public key.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match &self.key {
            VerifyingKey::P256(vk) => vk.to_encoded_point(false).as_bytes().to_vec(),
            VerifyingKey::P384(vk) => vk.to_encoded_point(false).as_bytes().to_vec(),
            VerifyingKey::P521(vk) => vk.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    pub fn curve(&self) -> EllipticCurve {
        match self.key {
            VerifyingKey::P256(_) => EllipticCurve::P256,
            VerifyingKey::P384(_) => EllipticCurve::P384,
            VerifyingKey::P521(_) => EllipticCurve::P521,
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.alg.name
    }

    pub fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> Result<()> {
        let expected = 2 * self.curve().field_size_bytes();
        if signature.len() != expected {
            return Err(CoseError::InvalidSignatureLength {
                expected,
                actual: signature.len(),
            });
        }

        let verified = match &self.key {
            VerifyingKey::P256(vk) => p256::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| vk.verify_prehash(digest, &sig)),
            VerifyingKey::P384(vk) => p384::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| vk.verify_prehash(digest, &sig)),
            VerifyingKey::P521(vk) => p521::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| vk.verify_prehash(digest, &sig)),
        };
        verified.map_err(|_| CoseError::VerificationFailed)
    }
}

impl fmt::Debug for EcdsaVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaVerifier")
            .field("alg", &self.alg.name)
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

impl AlgorithmMethod for EcdsaVerifier {
    fn algorithm(&self) -> AlgId {
        self.alg.id
    }
}

impl ByteVerifier for EcdsaVerifier {
    fn verify(&self, digest: &[u8], signature: &[u8]) -> Result<()> {
        self.verify_digest(digest, signature)
    }
}
