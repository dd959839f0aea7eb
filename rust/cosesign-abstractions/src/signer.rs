// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signer and verifier capabilities.
//!
//! Signers and verifiers work on digests: the Sign/Verify protocol hashes
//! the Sig_structure with the algorithm's hash before handing it over.

use cosesign_common::{AlgId, CoseError, Result};
use rand_core::CryptoRngCore;

pub trait ByteSigner: Send + Sync {
    fn sign(&self, rng: &mut dyn CryptoRngCore, digest: &[u8]) -> Result<Vec<u8>>;
}

pub trait ByteVerifier: Send + Sync {
    /// Any mismatch is reported as `CoseError::VerificationFailed`.
    fn verify(&self, digest: &[u8], signature: &[u8]) -> Result<()>;
}

pub trait AlgorithmMethod {
    /// The COSE algorithm id this key is bound to.
    fn algorithm(&self) -> AlgId;
}

/// A signer bound to one algorithm.
pub trait MessageSigner: AlgorithmMethod + ByteSigner {
    /// A verifier for the signer's public key.
    fn verifier(&self) -> Result<Box<dyn MessageVerifier>>;
}

/// A verifier bound to one algorithm.
pub trait MessageVerifier: AlgorithmMethod + ByteVerifier {}

impl<T: AlgorithmMethod + ByteVerifier + ?Sized> MessageVerifier for T {}

/// Sign one digest with every signer, in order.
pub fn sign_digest(rng: &mut dyn CryptoRngCore, digest: &[u8], signers: &[&dyn ByteSigner]) -> Result<Vec<Vec<u8>>> {
    signers.iter().map(|s| s.sign(&mut *rng, digest)).collect()
}

/// Check one digest against `signatures[i]` with `verifiers[i]` for every `i`.
pub fn verify_digest(digest: &[u8], signatures: &[Vec<u8>], verifiers: &[&dyn ByteVerifier]) -> Result<()> {
    if signatures.len() != verifiers.len() {
        return Err(CoseError::SignerCountMismatch {
            signatures: signatures.len(),
            signers: verifiers.len(),
        });
    }

    signatures
        .iter()
        .zip(verifiers)
        .try_for_each(|(sig, v)| v.verify(digest, sig))
}
