// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use minicbor::Encoder;

use crate::algorithms::HashAlgorithm;
use crate::error::{CoseError, Result};

/// Context string that opens a Sig_structure (RFC 8152 section 4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigContext {
    Signature,
    Signature1,
    CounterSignature,
}

impl SigContext {
    pub fn as_str(self) -> &'static str {
        match self {
            SigContext::Signature => "Signature",
            SigContext::Signature1 => "Signature1",
            SigContext::CounterSignature => "CounterSignature",
        }
    }
}

/// The to-be-signed structure of one signature.
///
/// `sign_protected` is left out of the encoding for `Signature1`, which has
/// no per-signer layer.
#[derive(Debug, Clone, Copy)]
pub struct SigStructure<'a> {
    pub context: SigContext,
    pub body_protected: &'a [u8],
    pub sign_protected: &'a [u8],
    pub external_aad: &'a [u8],
    pub payload: &'a [u8],
}

impl SigStructure<'_> {
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);

        let with_signer = self.context != SigContext::Signature1;
        enc.array(if with_signer { 5 } else { 4 })
            .map_err(CoseError::cbor)?;
        enc.str(self.context.as_str()).map_err(CoseError::cbor)?;
        enc.bytes(self.body_protected).map_err(CoseError::cbor)?;
        if with_signer {
            enc.bytes(self.sign_protected).map_err(CoseError::cbor)?;
        }
        enc.bytes(self.external_aad).map_err(CoseError::cbor)?;
        enc.bytes(self.payload).map_err(CoseError::cbor)?;

        tracing::trace!(context = self.context.as_str(), len = out.len(), "encoded Sig_structure");
        Ok(out)
    }
}

pub fn build_sig_structure(
    context: SigContext,
    body_protected: &[u8],
    sign_protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
) -> Result<Vec<u8>> {
    SigStructure {
        context,
        body_protected,
        sign_protected,
        external_aad,
        payload,
    }
    .encode()
}

/// Digest an encoded Sig_structure with the algorithm's hash.
pub fn hash_sig_structure(sig_structure: &[u8], hash: Option<HashAlgorithm>) -> Result<Vec<u8>> {
    let hash = hash.ok_or(CoseError::HashUnavailable("unknown"))?;
    Ok(hash.digest(sig_structure))
}
