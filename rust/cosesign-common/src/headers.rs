// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::algorithms::{AlgId, Algorithm};
use crate::cbor;
use crate::common_headers::CommonHeader;
use crate::compression::{compress_headers, decompress_headers, try_compress_headers};
use crate::error::{CoseError, Result};
use crate::header_map::{HeaderKey, HeaderMap, HeaderValue};

/// The protected and unprotected header buckets of a COSE layer.
///
/// Callers may use either labels or tags as keys; serialization compresses
/// and deserialization decompresses.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    pub protected: HeaderMap,
    pub unprotected: HeaderMap,

    /// Protected bytes as they arrived on the wire. Reused for the
    /// Sig_structure only while they still describe `protected`.
    wire_protected: Option<Vec<u8>>,
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.protected == other.protected && self.unprotected == other.unprotected
    }
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_protected(mut self, key: impl Into<HeaderKey>, value: impl Into<HeaderValue>) -> Self {
        self.protected.insert(key.into(), value.into());
        self
    }

    pub fn with_unprotected(mut self, key: impl Into<HeaderKey>, value: impl Into<HeaderValue>) -> Self {
        self.unprotected.insert(key.into(), value.into());
        self
    }

    /// Look `key` up in the protected bucket, then the unprotected one.
    ///
    /// The key is matched as given; no label/tag translation happens here.
    pub fn get(&self, key: &HeaderKey) -> Result<&HeaderValue> {
        match (self.protected.get(key), self.unprotected.get(key)) {
            (Some(_), Some(_)) => Err(CoseError::AmbiguousKey(key.clone())),
            (Some(v), None) | (None, Some(v)) => Ok(v),
            (None, None) => Err(CoseError::KeyNotFound(key.clone())),
        }
    }

    /// The algorithm id named by the `alg` header, whether it was stored
    /// under the label or the tag, and as a name or an id.
    pub fn algorithm(&self) -> Result<AlgId> {
        let compressed = Headers {
            protected: compress_headers(&self.protected),
            unprotected: compress_headers(&self.unprotected),
            wire_protected: None,
        };

        let value = match compressed.get(&CommonHeader::Alg.key()) {
            Ok(v) => v,
            Err(CoseError::KeyNotFound(_)) => return Err(CoseError::AlgNotFound),
            Err(e) => return Err(e),
        };

        Algorithm::from_header_value(value)
            .map(|alg| alg.id)
            .map_err(|_| CoseError::AlgNotFound)
    }

    /// Serialized protected bucket: an empty byte string when there are no
    /// protected headers, otherwise the compressed map as CBOR.
    pub fn encode_protected(&self) -> Result<Vec<u8>> {
        if let Some(wire) = &self.wire_protected {
            if cbor::decode_header_map(wire).is_ok_and(|m| decompress_headers(&m) == self.protected) {
                return Ok(wire.clone());
            }
        }

        if self.protected.is_empty() {
            return Ok(Vec::new());
        }

        cbor::encode_header_map(&try_compress_headers(&self.protected)?)
    }

    pub fn encode_unprotected(&self) -> Result<HeaderMap> {
        try_compress_headers(&self.unprotected)
    }

    /// Rebuild headers from the two wire buckets.
    pub fn decode(protected: &[u8], unprotected: &HeaderMap) -> Result<Self> {
        let protected_map = cbor::decode_header_map(protected)?;
        Ok(Self {
            protected: decompress_headers(&protected_map),
            unprotected: decompress_headers(unprotected),
            wire_protected: (!protected.is_empty()).then(|| protected.to_vec()),
        })
    }
}
