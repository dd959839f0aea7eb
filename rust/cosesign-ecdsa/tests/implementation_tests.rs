// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_abstractions::{find_implementation, implementation_name, AlgorithmImplementation, AlgorithmMethod};
use cosesign_common::CoseError;
use cosesign_ecdsa::{ECDSA, ECDSA_IMPLEMENTATION_ID, ECDSA_IMPLEMENTATION_NAME};
use p256::elliptic_curve::rand_core::OsRng;
use p256::pkcs8::EncodePublicKey as _;

/// The ECDSA family registers itself and answers for ES* names only.
#[test]
fn ecdsa_family_is_registered() {
    assert_eq!(implementation_name(ECDSA_IMPLEMENTATION_ID), Some(ECDSA_IMPLEMENTATION_NAME));

    for alg in ["ES256", "ES384", "ES512"] {
        let family = find_implementation(alg).unwrap();
        assert_eq!(family.name(), "ecdsa");
    }
    assert!(find_implementation("PS256").is_none());
}

#[test]
fn family_constructors_dispatch_by_name() {
    assert!(ECDSA.supports_algorithm("ES384"));
    assert!(!ECDSA.supports_algorithm("PS256"));

    let signer = ECDSA.new_signer("ES384", &mut OsRng).unwrap();
    assert_eq!(signer.algorithm(), -35);

    assert!(matches!(
        ECDSA.new_signer("PS256", &mut OsRng),
        Err(CoseError::UnsupportedAlgorithm(_))
    ));

    let sk = p256::SecretKey::random(&mut OsRng);
    let spki = sk.public_key().to_public_key_der().unwrap();
    let verifier = ECDSA.new_verifier_from_public_key_der("ES256", spki.as_bytes()).unwrap();
    assert_eq!(verifier.algorithm(), -7);
}
