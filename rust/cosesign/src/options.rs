// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[derive(Debug, Default, Clone, Copy)]
pub struct EncodeOptions {
    /// Wrap the message in the COSE_Sign CBOR tag (98).
    pub tagged: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeOptions {
    /// Reject reader input longer than this many bytes.
    pub max_len: Option<usize>,
}
