// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Strict CBOR codec for header values and header maps.
//!
//! Decoding rejects indefinite-length items, duplicate map keys and trailing
//! bytes. Integers of any wire width are normalized (see [`HeaderValue`]).

use std::collections::BTreeMap;

use minicbor::data::Type;
use minicbor::{Decoder, Encoder};

use crate::error::{CoseError, Result};
use crate::header_map::{HeaderKey, HeaderMap, HeaderValue};

const MAX_NESTING: usize = 64;

pub fn encode(value: &HeaderValue) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    encode_value_into(&mut enc, value)?;
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<HeaderValue> {
    let mut dec = Decoder::new(bytes);
    let value = decode_value(&mut dec, 0)?;
    ensure_consumed(&dec, bytes)?;
    Ok(value)
}

pub fn encode_header_map(map: &HeaderMap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    encode_header_map_into(&mut enc, map)?;
    Ok(out)
}

/// Decode a serialized header map. An empty input is an empty map, which is
/// how an absent protected header bucket travels on the wire.
pub fn decode_header_map(bytes: &[u8]) -> Result<HeaderMap> {
    if bytes.is_empty() {
        return Ok(BTreeMap::new());
    }

    let mut dec = Decoder::new(bytes);
    let map = decode_header_map_from_decoder(&mut dec)?;
    ensure_consumed(&dec, bytes)?;
    Ok(map)
}

pub fn encode_header_map_into(enc: &mut Encoder<&mut Vec<u8>>, map: &HeaderMap) -> Result<()> {
    enc.map(map.len() as u64).map_err(CoseError::cbor)?;
    for (k, v) in map {
        encode_key_into(enc, k)?;
        encode_value_into(enc, v)?;
    }
    Ok(())
}

pub fn decode_header_map_from_decoder(dec: &mut Decoder<'_>) -> Result<HeaderMap> {
    decode_map(dec, 0)
}

fn ensure_consumed(dec: &Decoder<'_>, bytes: &[u8]) -> Result<()> {
    if dec.position() != bytes.len() {
        return Err(CoseError::Cbor("trailing bytes after CBOR item".to_string()));
    }
    Ok(())
}

fn encode_key_into(enc: &mut Encoder<&mut Vec<u8>>, key: &HeaderKey) -> Result<()> {
    match key {
        HeaderKey::Int(i) => enc.i64(*i).map_err(CoseError::cbor)?,
        HeaderKey::Text(s) => enc.str(s).map_err(CoseError::cbor)?,
    };
    Ok(())
}

fn encode_value_into(enc: &mut Encoder<&mut Vec<u8>>, value: &HeaderValue) -> Result<()> {
    match value {
        HeaderValue::Int(i) => {
            enc.i64(*i).map_err(CoseError::cbor)?;
        }
        HeaderValue::UInt(u) => {
            enc.u64(*u).map_err(CoseError::cbor)?;
        }
        HeaderValue::Bytes(b) => {
            enc.bytes(b).map_err(CoseError::cbor)?;
        }
        HeaderValue::Text(s) => {
            enc.str(s).map_err(CoseError::cbor)?;
        }
        HeaderValue::Array(items) => {
            enc.array(items.len() as u64).map_err(CoseError::cbor)?;
            for item in items {
                encode_value_into(enc, item)?;
            }
        }
        HeaderValue::Map(map) => encode_header_map_into(enc, map)?,
        HeaderValue::Bool(b) => {
            enc.bool(*b).map_err(CoseError::cbor)?;
        }
        HeaderValue::Null => {
            enc.null().map_err(CoseError::cbor)?;
        }
    }
    Ok(())
}

fn is_integer(t: Type) -> bool {
    matches!(
        t,
        Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int | Type::U8 | Type::U16 | Type::U32 | Type::U64
    )
}

fn decode_integer(dec: &mut Decoder<'_>) -> Result<HeaderValue> {
    let wide = i128::from(dec.int().map_err(CoseError::cbor)?);
    if let Ok(i) = i64::try_from(wide) {
        return Ok(HeaderValue::Int(i));
    }
    if let Ok(u) = u64::try_from(wide) {
        return Ok(HeaderValue::UInt(u));
    }
    Err(CoseError::Cbor(format!("integer {wide} is out of range")))
}

fn decode_key(dec: &mut Decoder<'_>) -> Result<HeaderKey> {
    let t = dec.datatype().map_err(CoseError::cbor)?;
    if is_integer(t) {
        return match decode_integer(dec)? {
            HeaderValue::Int(i) => Ok(HeaderKey::Int(i)),
            _ => Err(CoseError::Cbor("integer header key is out of range".to_string())),
        };
    }
    match t {
        Type::String => {
            let s = dec.str().map_err(CoseError::cbor)?;
            Ok(HeaderKey::Text(s.to_string()))
        }
        other => Err(CoseError::Cbor(format!("unsupported header key type: {other:?}"))),
    }
}

fn decode_map(dec: &mut Decoder<'_>, depth: usize) -> Result<HeaderMap> {
    let len = dec
        .map()
        .map_err(CoseError::cbor)?
        .ok_or_else(|| CoseError::Cbor("indefinite-length maps are not supported".to_string()))?;

    let mut map = BTreeMap::new();
    for _ in 0..len {
        let key = decode_key(dec)?;
        let value = decode_value(dec, depth + 1)?;
        if map.contains_key(&key) {
            return Err(CoseError::DuplicateHeaderLabel(key));
        }
        map.insert(key, value);
    }
    Ok(map)
}

fn decode_value(dec: &mut Decoder<'_>, depth: usize) -> Result<HeaderValue> {
    if depth > MAX_NESTING {
        return Err(CoseError::Cbor("header value nesting is too deep".to_string()));
    }

    let t = dec.datatype().map_err(CoseError::cbor)?;
    if is_integer(t) {
        return decode_integer(dec);
    }

    match t {
        Type::Null => {
            dec.null().map_err(CoseError::cbor)?;
            Ok(HeaderValue::Null)
        }
        Type::Bool => Ok(HeaderValue::Bool(dec.bool().map_err(CoseError::cbor)?)),
        Type::Bytes => Ok(HeaderValue::Bytes(dec.bytes().map_err(CoseError::cbor)?.to_vec())),
        Type::String => Ok(HeaderValue::Text(dec.str().map_err(CoseError::cbor)?.to_string())),
        Type::Array => {
            let len = dec
                .array()
                .map_err(CoseError::cbor)?
                .ok_or_else(|| CoseError::Cbor("indefinite-length arrays are not supported".to_string()))?;
            let mut out = Vec::new();
            for _ in 0..len {
                out.push(decode_value(dec, depth + 1)?);
            }
            Ok(HeaderValue::Array(out))
        }
        Type::Map => Ok(HeaderValue::Map(decode_map(dec, depth)?)),
        other => Err(CoseError::Cbor(format!("unsupported header value type: {other:?}"))),
    }
}
