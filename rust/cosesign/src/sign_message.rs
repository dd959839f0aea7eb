// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The COSE_Sign Sign/Verify protocol.
//!
//! Each signature moves from unsigned to signed exactly once. Sign and
//! Verify walk the signatures in index order and stop at the first failure;
//! Sign does not roll back signatures written before the failing index.

use cosesign_abstractions::{AlgorithmMethod, ByteSigner, ByteVerifier, MessageSigner, MessageVerifier};
use cosesign_common::{
    build_sig_structure, hash_sig_structure, AlgId, Algorithm, CoseError, Headers, Result, SigContext,
};
use rand_core::CryptoRngCore;

use crate::signature::Signature;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignMessage {
    pub headers: Headers,
    /// Message content. `None` is signed as an empty byte string and
    /// travels as CBOR null.
    pub payload: Option<Vec<u8>>,
    pub signatures: Option<Vec<Signature>>,
}

impl SignMessage {
    /// An empty message with no signatures list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    pub fn add_signature(&mut self, signature: Signature) {
        self.signatures.get_or_insert_with(Vec::new).push(signature);
    }

    /// Encoded Sig_structure for `signature` over this message.
    pub fn sig_structure(&self, external_aad: &[u8], signature: &Signature) -> Result<Vec<u8>> {
        let sig_headers = signature.headers.as_ref().ok_or(CoseError::NilSigHeader)?;
        build_sig_structure(
            SigContext::Signature,
            &self.headers.encode_protected()?,
            &sig_headers.encode_protected()?,
            external_aad,
            self.payload.as_deref().unwrap_or_default(),
        )
    }

    /// Digest of the Sig_structure under `signature`'s algorithm.
    pub fn signature_digest(&self, external_aad: &[u8], signature: &Signature) -> Result<Vec<u8>> {
        let hash = Algorithm::by_id(signature_algorithm(signature)?)?.hash_algorithm()?;
        let tbs = self.sig_structure(external_aad, signature)?;
        hash_sig_structure(&tbs, Some(hash))
    }

    /// Sign every signature with the signer at the same index.
    pub fn sign(
        &mut self,
        rng: &mut dyn CryptoRngCore,
        external_aad: &[u8],
        signers: &[&dyn MessageSigner],
    ) -> Result<()> {
        let count = match &self.signatures {
            None => return Err(CoseError::NilSignatures),
            Some(sigs) if sigs.is_empty() => return Err(CoseError::NoSignatures),
            Some(sigs) => sigs.len(),
        };
        if count != signers.len() {
            return Err(CoseError::SignerCountMismatch {
                signatures: count,
                signers: signers.len(),
            });
        }

        for (index, signer) in signers.iter().enumerate() {
            let (alg, digest) = self.prepare_to_sign(index, external_aad)?;

            let signer_alg = signer.algorithm();
            if signer_alg != alg {
                return Err(CoseError::SignerAlgorithmMismatch {
                    signer: signer_alg,
                    signature: alg,
                });
            }

            tracing::debug!(index, alg, "signing COSE_Signature");
            let bytes = signer.sign(&mut *rng, &digest)?;
            if let Some(slot) = self.signatures.as_mut().and_then(|s| s.get_mut(index)) {
                slot.signature_bytes = Some(bytes);
            }
        }
        Ok(())
    }

    /// Check every signature with the verifier at the same index.
    ///
    /// A message without signatures verifies trivially.
    pub fn verify(&self, external_aad: &[u8], verifiers: &[&dyn MessageVerifier]) -> Result<()> {
        let signatures = match &self.signatures {
            Some(sigs) if !sigs.is_empty() => sigs,
            _ => return Ok(()),
        };
        if signatures.len() != verifiers.len() {
            return Err(CoseError::SignerCountMismatch {
                signatures: signatures.len(),
                signers: verifiers.len(),
            });
        }

        for (index, (signature, verifier)) in signatures.iter().zip(verifiers).enumerate() {
            if signature.headers.is_none() {
                return Err(CoseError::NilSigHeader);
            }
            let bytes = match &signature.signature_bytes {
                Some(b) if !b.is_empty() => b,
                _ => return Err(CoseError::MissingSignatureBytes(index)),
            };

            let alg = signature_algorithm(signature)?;
            let digest = self.signature_digest(external_aad, signature)?;

            tracing::debug!(index, alg, "verifying COSE_Signature");
            if let Err(e) = verifier.verify(&digest, bytes) {
                tracing::warn!(index, alg, error = %e, "COSE_Signature verification failed");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Checks for one index up to the digest; leaves the message untouched.
    fn prepare_to_sign(&self, index: usize, external_aad: &[u8]) -> Result<(AlgId, Vec<u8>)> {
        let signature = self
            .signatures
            .as_ref()
            .and_then(|s| s.get(index))
            .ok_or(CoseError::NoSignatures)?;
        if signature.headers.is_none() {
            return Err(CoseError::NilSigHeader);
        }
        if signature.is_signed() {
            return Err(CoseError::AlreadySigned(index));
        }

        let alg = signature_algorithm(signature)?;
        let digest = self.signature_digest(external_aad, signature)?;
        Ok((alg, digest))
    }
}

/// The signature's algorithm, restricted to second-layer (negative) ids.
fn signature_algorithm(signature: &Signature) -> Result<AlgId> {
    let alg = signature.algorithm()?;
    if alg >= 0 {
        return Err(CoseError::InvalidAlg(alg));
    }
    Ok(alg)
}
