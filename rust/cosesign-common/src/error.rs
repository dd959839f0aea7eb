// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::algorithms::EllipticCurve;
use crate::header_map::HeaderKey;

pub type Result<T> = std::result::Result<T, CoseError>;

/// Every failure surfaced by the COSE_Sign crates.
///
/// Registry misses (`UnknownHeaderLabel`, `UnknownHeaderTag`,
/// `AlgorithmNameNotFound`, `AlgorithmIdNotFound`) are recoverable; the
/// compression engine treats them as pass-through. Everything else is
/// terminal for the Sign/Verify call that produced it.
#[derive(Debug, thiserror::Error)]
pub enum CoseError {
    #[error("no common COSE tag for label {0:?}")]
    UnknownHeaderLabel(String),

    #[error("no common COSE label for tag {0}")]
    UnknownHeaderTag(i64),

    #[error("no algorithm named {0:?}")]
    AlgorithmNameNotFound(String),

    #[error("no algorithm with id {0}")]
    AlgorithmIdNotFound(i128),

    #[error("header {0:?} not found in protected or unprotected headers")]
    KeyNotFound(HeaderKey),

    #[error("ambiguous header {0:?} found in both protected and unprotected headers")]
    AmbiguousKey(HeaderKey),

    #[error("error fetching alg")]
    AlgNotFound,

    #[error("invalid algorithm {0}: COSE_Signature requires a negative algorithm id")]
    InvalidAlg(i64),

    #[error("hash function is not available for algorithm {0}")]
    HashUnavailable(&'static str),

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("signed message signatures is nil")]
    NilSignatures,

    #[error("no signatures to sign the message")]
    NoSignatures,

    #[error("{signers} signers for {signatures} signatures")]
    SignerCountMismatch { signatures: usize, signers: usize },

    #[error("signature headers is nil")]
    NilSigHeader,

    #[error("signature {0} already has signature bytes")]
    AlreadySigned(usize),

    #[error("signature {0} is missing signature bytes to verify")]
    MissingSignatureBytes(usize),

    #[error("signer of algorithm {signer} cannot generate a signature of algorithm {signature}")]
    SignerAlgorithmMismatch { signer: i64, signature: i64 },

    #[error("unsupported algorithm {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("cannot use a {key} key with {algorithm}, which requires {expected}")]
    CurveMismatch {
        algorithm: &'static str,
        key: EllipticCurve,
        expected: EllipticCurve,
    },

    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("no algorithm implementation supports {0:?}")]
    NoImplementation(String),

    #[error("header {0:?} appears more than once after label normalization")]
    DuplicateHeaderLabel(HeaderKey),

    #[error("CBOR error: {0}")]
    Cbor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input exceeds the maximum length of {0} bytes")]
    InputTooLarge(usize),
}

impl CoseError {
    /// Normalize codec failures into `CoseError::Cbor` without leaking the codec's error type.
    pub fn cbor<E: std::fmt::Display>(e: E) -> Self {
        Self::Cbor(e.to_string())
    }

    /// True for registry lookup misses.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownHeaderLabel(_)
                | Self::UnknownHeaderTag(_)
                | Self::AlgorithmNameNotFound(_)
                | Self::AlgorithmIdNotFound(_)
        )
    }
}
