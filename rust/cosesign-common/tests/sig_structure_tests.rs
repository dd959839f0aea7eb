// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_common::{build_sig_structure, hash_sig_structure, CoseError, HashAlgorithm, SigContext};

fn expected_signature_structure() -> Vec<u8> {
    let mut v = vec![0x85, 0x69];
    v.extend_from_slice(b"Signature");
    v.push(0x40);
    v.extend_from_slice(&[0x43, 0xa1, 0x01, 0x26]);
    v.push(0x40);
    v.push(0x45);
    v.extend_from_slice(b"hello");
    v
}

#[test]
fn signature_structure_is_byte_exact() {
    let bytes = build_sig_structure(SigContext::Signature, &[], &[0xa1, 0x01, 0x26], &[], b"hello").unwrap();
    assert_eq!(bytes, expected_signature_structure());
}

#[test]
fn external_aad_is_carried_as_bytes() {
    let bytes = build_sig_structure(SigContext::CounterSignature, &[], &[], b"aad", &[]).unwrap();

    let mut dec = minicbor::Decoder::new(&bytes);
    assert_eq!(dec.array().unwrap(), Some(5));
    assert_eq!(dec.str().unwrap(), "CounterSignature");
    assert_eq!(dec.bytes().unwrap(), b"");
    assert_eq!(dec.bytes().unwrap(), b"");
    assert_eq!(dec.bytes().unwrap(), b"aad");
    assert_eq!(dec.bytes().unwrap(), b"");
}

#[test]
fn signature1_omits_signer_protected() {
    let bytes = build_sig_structure(SigContext::Signature1, &[0xa0], &[0xff], &[], b"p").unwrap();

    let mut dec = minicbor::Decoder::new(&bytes);
    assert_eq!(dec.array().unwrap(), Some(4));
    assert_eq!(dec.str().unwrap(), "Signature1");
    assert_eq!(dec.bytes().unwrap(), &[0xa0]);
    assert_eq!(dec.bytes().unwrap(), b"");
    assert_eq!(dec.bytes().unwrap(), b"p");
}

#[test]
fn hashing_uses_the_algorithm_digest() {
    let tbs = expected_signature_structure();
    let digest = hash_sig_structure(&tbs, Some(HashAlgorithm::Sha384)).unwrap();
    assert_eq!(digest, HashAlgorithm::Sha384.digest(&tbs));
    assert_eq!(digest.len(), 48);

    assert!(matches!(hash_sig_structure(&tbs, None), Err(CoseError::HashUnavailable(_))));
}
