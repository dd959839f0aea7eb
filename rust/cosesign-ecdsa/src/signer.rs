// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use cosesign_abstractions::{AlgorithmMethod, ByteSigner, MessageSigner, MessageVerifier};
use cosesign_common::{AlgId, Algorithm, CoseError, EllipticCurve, Result};
use rand_core::CryptoRngCore;
use signature::hazmat::RandomizedPrehashSigner;

use crate::key::EcdsaPrivateKey;
use crate::verifier::EcdsaVerifier;

pub(crate) enum SigningKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
}

/// Signs digests with one ECDSA private key for one algorithm.
pub struct EcdsaSigner {
    alg: &'static Algorithm,
    key: SigningKey,
}

impl EcdsaSigner {
    /// Generate a fresh key on the curve `alg_name` requires.
    pub fn generate(alg_name: &str, rng: &mut dyn CryptoRngCore) -> Result<Self> {
        let (_, curve) = crate::resolve(alg_name)?;
        let key = EcdsaPrivateKey::generate(curve, rng);
        tracing::debug!(alg = alg_name, curve = %curve, "generated ECDSA key");
        Self::from_key(alg_name, &key)
    }

    /// Use an existing key. The key's curve must be the one `alg_name` requires.
    pub fn from_key(alg_name: &str, key: &EcdsaPrivateKey) -> Result<Self> {
        let (alg, expected) = crate::resolve(alg_name)?;
        if key.curve() != expected {
            return Err(CoseError::CurveMismatch {
                algorithm: alg.name,
                key: key.curve(),
                expected,
            });
        }

        let key = match key {
            EcdsaPrivateKey::P256(sk) => SigningKey::P256(p256::ecdsa::SigningKey::from(sk)),
            EcdsaPrivateKey::P384(sk) => SigningKey::P384(p384::ecdsa::SigningKey::from(sk)),
            EcdsaPrivateKey::P521(sk) => SigningKey::P521(
                p521::ecdsa::SigningKey::from_bytes(&sk.to_bytes()).map_err(|e| CoseError::InvalidKey(e.to_string()))?,
            ),
        };
        Ok(Self { alg, key })
    }

    pub fn from_pkcs8_der(alg_name: &str, der: &[u8]) -> Result<Self> {
        Self::from_key(alg_name, &EcdsaPrivateKey::from_pkcs8_der(der)?)
    }

    pub fn curve(&self) -> EllipticCurve {
        match self.key {
            SigningKey::P256(_) => EllipticCurve::P256,
            SigningKey::P384(_) => EllipticCurve::P384,
            SigningKey::P521(_) => EllipticCurve::P521,
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.alg.name
    }

    /// The verifier for this signer's public key.
    pub fn public_verifier(&self) -> EcdsaVerifier {
        match &self.key {
            SigningKey::P256(sk) => EcdsaVerifier::from_parts(self.alg, crate::verifier::VerifyingKey::P256(*sk.verifying_key())),
            SigningKey::P384(sk) => EcdsaVerifier::from_parts(self.alg, crate::verifier::VerifyingKey::P384(*sk.verifying_key())),
            SigningKey::P521(sk) => {
                EcdsaVerifier::from_parts(self.alg, crate::verifier::VerifyingKey::P521(p521::ecdsa::VerifyingKey::from(sk)))
            }
        }
    }

    /// Sign a digest, returning fixed-width `r || s`.
    ///
    /// Nonces are RFC 6979 nonces hedged with fresh bytes from `rng`.
    pub fn sign_digest(&self, rng: &mut dyn CryptoRngCore, digest: &[u8]) -> Result<Vec<u8>> {
        let mut rng = rng;
        let width = self.curve().field_size_bytes();
        let failed = |e: signature::Error| CoseError::SigningFailed(e.to_string());

        match &self.key {
            SigningKey::P256(sk) => {
                let sig: p256::ecdsa::Signature = sk.sign_prehash_with_rng(&mut rng, digest).map_err(failed)?;
                let (r, s) = sig.split_bytes();
                encode_fixed_width(&r, &s, width)
            }
            SigningKey::P384(sk) => {
                let sig: p384::ecdsa::Signature = sk.sign_prehash_with_rng(&mut rng, digest).map_err(failed)?;
                let (r, s) = sig.split_bytes();
                encode_fixed_width(&r, &s, width)
            }
            SigningKey::P521(sk) => {
                let sig: p521::ecdsa::Signature = sk.sign_prehash_with_rng(&mut rng, digest).map_err(failed)?;
                let (r, s) = sig.split_bytes();
                encode_fixed_width(&r, &s, width)
            }
        }
    }
}

/// Concatenate `r` and `s`, each left-padded with zeros to `width` bytes.
///
/// Leading zero bytes beyond `width` are dropped; any other overflow is an
/// error, never a truncation.
pub(crate) fn encode_fixed_width(r: &[u8], s: &[u8], width: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; 2 * width];
    for (i, part) in [r, s].into_iter().enumerate() {
        let first_nonzero = part.iter().position(|b| *b != 0).unwrap_or(part.len());
        let part = &part[first_nonzero..];
        if part.len() > width {
            return Err(CoseError::InvalidSignatureLength {
                expected: width,
                actual: part.len(),
            });
        }
        let end = (i + 1) * width;
        out[end - part.len()..end].copy_from_slice(part);
    }
    Ok(out)
}

impl fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("alg", &self.alg.name)
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

impl AlgorithmMethod for EcdsaSigner {
    fn algorithm(&self) -> AlgId {
        self.alg.id
    }
}

impl ByteSigner for EcdsaSigner {
    fn sign(&self, rng: &mut dyn CryptoRngCore, digest: &[u8]) -> Result<Vec<u8>> {
        self.sign_digest(rng, digest)
    }
}

impl MessageSigner for EcdsaSigner {
    fn verifier(&self) -> Result<Box<dyn MessageVerifier>> {
        Ok(Box::new(self.public_verifier()))
    }
}
