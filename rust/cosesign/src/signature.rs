// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_common::{AlgId, CommonHeader, CoseError, Headers, Result};

/// One signer's slot in a COSE_Sign message.
///
/// `headers` is `None` only for a default-constructed value; signing or
/// verifying such a slot fails with `NilSigHeader`.
///
/// Empty `signature_bytes` (`Some(vec![])`) mean the same as `None`: the
/// slot is unsigned. An empty signature bstr on the wire decodes to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub headers: Option<Headers>,
    pub signature_bytes: Option<Vec<u8>>,
}

impl Signature {
    /// An unsigned signature with empty headers.
    pub fn new() -> Self {
        Self {
            headers: Some(Headers::new()),
            signature_bytes: None,
        }
    }

    /// An unsigned signature whose protected headers name `alg_name`.
    pub fn with_algorithm(alg_name: &str) -> Self {
        Self {
            headers: Some(Headers::new().with_protected(CommonHeader::Alg.name(), alg_name)),
            signature_bytes: None,
        }
    }

    pub fn algorithm(&self) -> Result<AlgId> {
        self.headers.as_ref().ok_or(CoseError::NilSigHeader)?.algorithm()
    }

    /// True once the slot holds non-empty signature bytes.
    pub fn is_signed(&self) -> bool {
        self.signature_bytes.as_ref().is_some_and(|b| !b.is_empty())
    }
}
