// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use cosesign_common::{CoseError, EllipticCurve, Result};
use p256::pkcs8::DecodePrivateKey;
use rand_core::CryptoRngCore;

/// An ECDSA private key on one of the supported curves.
#[derive(Clone)]
pub enum EcdsaPrivateKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcdsaPrivateKey {
    pub fn generate(curve: EllipticCurve, rng: &mut dyn CryptoRngCore) -> Self {
        let mut rng = rng;
        match curve {
            EllipticCurve::P256 => Self::P256(p256::SecretKey::random(&mut rng)),
            EllipticCurve::P384 => Self::P384(p384::SecretKey::random(&mut rng)),
            EllipticCurve::P521 => Self::P521(p521::SecretKey::random(&mut rng)),
        }
    }

    pub fn curve(&self) -> EllipticCurve {
        match self {
            Self::P256(_) => EllipticCurve::P256,
            Self::P384(_) => EllipticCurve::P384,
            Self::P521(_) => EllipticCurve::P521,
        }
    }

    /// Decode a PKCS#8 DER private key, detecting the curve from its OID.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        if let Ok(k) = p256::SecretKey::from_pkcs8_der(der) {
            return Ok(Self::P256(k));
        }
        if let Ok(k) = p384::SecretKey::from_pkcs8_der(der) {
            return Ok(Self::P384(k));
        }
        p521::SecretKey::from_pkcs8_der(der)
            .map(Self::P521)
            .map_err(|e| CoseError::InvalidKey(format!("not a P-256, P-384 or P-521 PKCS#8 key: {e}")))
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}
