// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign wire format.
//!
//! ```text
//! COSE_Sign = [ protected : bstr, unprotected : map, payload : bstr / nil, signatures : [+ COSE_Signature] ]
//! COSE_Signature = [ protected : bstr, unprotected : map, signature : bstr ]
//! ```
//!
//! Parsing is strict: exact array lengths, definite lengths only, no
//! trailing bytes, and no tag other than COSE_Sign (98).

use std::io::Read;

use cosesign_common::cbor::{decode_header_map_from_decoder, encode_header_map_into};
use cosesign_common::{CoseError, Headers, Result};
use minicbor::data::{Tag, Type};
use minicbor::{Decoder, Encoder};

use crate::options::{DecodeOptions, EncodeOptions};
use crate::sign_message::SignMessage;
use crate::signature::Signature;

pub const COSE_SIGN_TAG: u64 = 98;

fn encode_headers(enc: &mut Encoder<&mut Vec<u8>>, headers: &Headers) -> Result<()> {
    enc.bytes(&headers.encode_protected()?).map_err(CoseError::cbor)?;
    encode_header_map_into(enc, &headers.encode_unprotected()?)
}

pub fn encode_cose_sign(msg: &SignMessage, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);

    if options.tagged {
        enc.tag(Tag::new(COSE_SIGN_TAG)).map_err(CoseError::cbor)?;
    }
    enc.array(4).map_err(CoseError::cbor)?;
    encode_headers(&mut enc, &msg.headers)?;

    match &msg.payload {
        Some(p) => enc.bytes(p).map_err(CoseError::cbor)?,
        None => enc.null().map_err(CoseError::cbor)?,
    };

    let signatures = msg.signatures.as_deref().unwrap_or_default();
    enc.array(signatures.len() as u64).map_err(CoseError::cbor)?;
    for sig in signatures {
        let headers = sig.headers.as_ref().ok_or(CoseError::NilSigHeader)?;
        enc.array(3).map_err(CoseError::cbor)?;
        encode_headers(&mut enc, headers)?;
        enc.bytes(sig.signature_bytes.as_deref().unwrap_or_default())
            .map_err(CoseError::cbor)?;
    }

    Ok(out)
}

fn read_array_len(dec: &mut Decoder<'_>, what: &str) -> Result<u64> {
    dec.array()
        .map_err(|e| CoseError::Cbor(format!("{what} is not an array: {e}")))?
        .ok_or_else(|| CoseError::Cbor(format!("{what}: indefinite-length arrays are not supported")))
}

fn decode_headers(dec: &mut Decoder<'_>) -> Result<Headers> {
    let protected = dec
        .bytes()
        .map_err(|e| CoseError::Cbor(format!("protected header must be a bstr: {e}")))?;
    let unprotected = decode_header_map_from_decoder(dec)?;
    Headers::decode(protected, &unprotected)
}

fn decode_signature(dec: &mut Decoder<'_>) -> Result<Signature> {
    let len = read_array_len(dec, "COSE_Signature")?;
    if len != 3 {
        return Err(CoseError::Cbor(format!("COSE_Signature must have 3 elements, got {len}")));
    }

    let headers = decode_headers(dec)?;
    let bytes = dec
        .bytes()
        .map_err(|e| CoseError::Cbor(format!("signature must be a bstr: {e}")))?;

    Ok(Signature {
        headers: Some(headers),
        signature_bytes: (!bytes.is_empty()).then(|| bytes.to_vec()),
    })
}

/// Parse a COSE_Sign message from its CBOR encoding.
pub fn parse_cose_sign(input: &[u8]) -> Result<SignMessage> {
    let mut dec = Decoder::new(input);

    // Optional COSE_Sign tag (98)
    if matches!(dec.datatype().map_err(CoseError::cbor)?, Type::Tag) {
        let tag = dec.tag().map_err(CoseError::cbor)?;
        if tag != Tag::new(COSE_SIGN_TAG) {
            return Err(CoseError::Cbor(
                "unexpected CBOR tag (expected COSE_Sign tag 98 or no tag)".to_string(),
            ));
        }
    }

    let len = read_array_len(&mut dec, "COSE_Sign")?;
    if len != 4 {
        return Err(CoseError::Cbor(format!("COSE_Sign must have 4 elements, got {len}")));
    }

    let headers = decode_headers(&mut dec)?;

    let payload = match dec.datatype().map_err(CoseError::cbor)? {
        Type::Null => {
            dec.null().map_err(CoseError::cbor)?;
            None
        }
        Type::Bytes => Some(dec.bytes().map_err(CoseError::cbor)?.to_vec()),
        other => {
            return Err(CoseError::Cbor(format!("payload must be a bstr or null, got {other:?}")));
        }
    };

    let count = read_array_len(&mut dec, "signatures")?;
    let mut signatures = Vec::new();
    for _ in 0..count {
        signatures.push(decode_signature(&mut dec)?);
    }

    if dec.position() != input.len() {
        return Err(CoseError::Cbor("trailing bytes after COSE_Sign".to_string()));
    }

    Ok(SignMessage {
        headers,
        payload,
        signatures: Some(signatures),
    })
}

/// Parse a COSE_Sign message from a stream, honoring `options.max_len`.
pub fn parse_cose_sign_from_reader(reader: impl Read, options: &DecodeOptions) -> Result<SignMessage> {
    match options.max_len {
        Some(max_len) => parse_cose_sign_from_reader_with_max_len(reader, max_len),
        None => {
            let mut reader = reader;
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            parse_cose_sign(&buf)
        }
    }
}

/// Parse a COSE_Sign message from a stream, reading at most `max_len` bytes.
pub fn parse_cose_sign_from_reader_with_max_len(reader: impl Read, max_len: usize) -> Result<SignMessage> {
    let mut buf = Vec::new();
    reader.take((max_len as u64).saturating_add(1)).read_to_end(&mut buf)?;
    if buf.len() > max_len {
        return Err(CoseError::InputTooLarge(max_len));
    }
    parse_cose_sign(&buf)
}

impl SignMessage {
    pub fn to_cbor(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
        encode_cose_sign(self, options)
    }

    pub fn from_cbor(input: &[u8]) -> Result<Self> {
        parse_cose_sign(input)
    }
}
