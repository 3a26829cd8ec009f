mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{license_document, license_secret, test_identity};
use ed25519_dalek::Signer;
use warrant_license::{
    checkout, checkout_at, verify, verify_at, CheckoutRequest, FileStatus, LicenseFileError,
    SigningScheme, VerifyingIdentity,
};

const ALL_SCHEMES: [SigningScheme; 6] = [
    SigningScheme::None,
    SigningScheme::Ed25519,
    SigningScheme::RsaPkcs1Sign,
    SigningScheme::RsaPkcs1PssSign,
    SigningScheme::RsaPkcs1Encrypt,
    SigningScheme::RsaJwtRs256,
];

/// Replaces one character of a string field, guaranteeing a change.
fn flip_char(value: &str, index: usize) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

// ── Round trips ──────────────────────────────────────────────────

#[test]
fn round_trip_all_schemes_plain_and_encrypted() {
    let identity = test_identity();
    let verifying = identity.verifying();
    let id = "8e71ab96-0fc3-4a42-a312-91f79652f86c";

    for scheme in ALL_SCHEMES {
        for encrypted in [false, true] {
            let mut request =
                CheckoutRequest::new(license_document(id), &identity).scheme(scheme);
            if encrypted {
                request = request.encrypt(license_secret());
            }

            let cert = checkout(request).expect("checkout");
            let json = common::unarmor(&cert);
            assert_eq!(
                json["alg"].as_str().unwrap(),
                scheme.algorithm(encrypted),
                "alg for {scheme:?} (encrypted: {encrypted})"
            );

            let secret = license_secret();
            let secret = encrypted.then_some(secret.as_str());
            let verified = verify(&cert, &verifying, secret)
                .unwrap_or_else(|e| panic!("verify {scheme:?} (encrypted: {encrypted}): {e}"));

            assert_eq!(verified.status(), FileStatus::Valid);
            let envelope = verified.envelope();
            assert_eq!(envelope.data["type"], "licenses");
            assert_eq!(envelope.data["id"], id);
        }
    }
}

#[test]
fn round_trip_preserves_included_resources() {
    let identity = test_identity();
    let request = CheckoutRequest::new(license_document("lic-1"), &identity)
        .include(["product", "policy"]);
    let cert = checkout(request).expect("checkout");

    let verified = verify(&cert, &identity.verifying(), None).expect("verify");
    let included = &verified.envelope().included;
    assert_eq!(included.len(), 2);
    assert_eq!(included[0]["type"], "products");
    assert_eq!(included[1]["type"], "policies");
}

// ── Tampering ────────────────────────────────────────────────────

#[test]
fn tampered_enc_fails_for_every_scheme() {
    let identity = test_identity();
    let verifying = identity.verifying();

    for scheme in ALL_SCHEMES {
        let cert = checkout(
            CheckoutRequest::new(license_document("lic-1"), &identity).scheme(scheme),
        )
        .expect("checkout");

        let mut json = common::unarmor(&cert);
        let enc = json["enc"].as_str().unwrap().to_string();
        json["enc"] = serde_json::Value::String(flip_char(&enc, enc.len() / 2));

        let err = verify(&common::rearmor(&json), &verifying, None).unwrap_err();
        assert!(
            matches!(err, LicenseFileError::InvalidSignature),
            "tampered enc for {scheme:?}: {err}"
        );
    }
}

#[test]
fn tampered_sig_fails_for_every_scheme() {
    let identity = test_identity();
    let verifying = identity.verifying();

    for scheme in ALL_SCHEMES {
        let cert = checkout(
            CheckoutRequest::new(license_document("lic-1"), &identity).scheme(scheme),
        )
        .expect("checkout");

        let mut json = common::unarmor(&cert);
        let sig = json["sig"].as_str().unwrap().to_string();
        json["sig"] = serde_json::Value::String(flip_char(&sig, sig.len() / 2));

        let err = verify(&common::rearmor(&json), &verifying, None).unwrap_err();
        assert!(
            matches!(err, LicenseFileError::InvalidSignature),
            "tampered sig for {scheme:?}: {err}"
        );
    }
}

#[test]
fn tampered_encrypted_payload_is_rejected_before_decryption() {
    let identity = test_identity();
    let request =
        CheckoutRequest::new(license_document("lic-1"), &identity).encrypt(license_secret());
    let cert = checkout(request).expect("checkout");

    let mut json = common::unarmor(&cert);
    let enc = json["enc"].as_str().unwrap().to_string();
    json["enc"] = serde_json::Value::String(flip_char(&enc, 4));

    // Signature covers the encoded ciphertext, so tampering surfaces as a
    // signature failure, not a decryption failure.
    let secret = license_secret();
    let err = verify(
        &common::rearmor(&json),
        &identity.verifying(),
        Some(&secret),
    )
    .unwrap_err();
    assert!(matches!(err, LicenseFileError::InvalidSignature));
}

#[test]
fn mismatched_public_key_fails_verification() {
    let identity = test_identity();
    let cert = checkout(CheckoutRequest::new(license_document("lic-1"), &identity))
        .expect("checkout");

    let other = ed25519_dalek::SigningKey::from_bytes(&[9u8; 32]);
    let wrong = VerifyingIdentity::ed25519(other.verifying_key());

    let err = verify(&cert, &wrong, None).unwrap_err();
    assert!(matches!(err, LicenseFileError::InvalidSignature));
}

// ── Expiry ───────────────────────────────────────────────────────

#[test]
fn expired_certificate_returns_envelope_with_expired_status() {
    let identity = test_identity();
    let issued_at = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let request = CheckoutRequest::new(license_document("lic-1"), &identity)
        .ttl(Some(Duration::days(1)));
    let cert = checkout_at(request, issued_at, &mut rand::rngs::OsRng).expect("checkout");

    let verified = verify_at(
        &cert,
        &identity.verifying(),
        None,
        issued_at + Duration::days(2),
    )
    .expect("verify");

    assert_eq!(verified.status(), FileStatus::Expired);
    assert_eq!(verified.envelope().data["id"], "lic-1");
}

#[test]
fn certificate_without_ttl_never_expires() {
    let identity = test_identity();
    let issued_at = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let request = CheckoutRequest::new(license_document("lic-1"), &identity).ttl(None);
    let cert = checkout_at(request, issued_at, &mut rand::rngs::OsRng).expect("checkout");

    let verified = verify_at(
        &cert,
        &identity.verifying(),
        None,
        issued_at + Duration::days(10_000),
    )
    .expect("verify");

    assert_eq!(verified.status(), FileStatus::Valid);
}

// ── Armor & structure ────────────────────────────────────────────

#[test]
fn accepts_line_wrapped_base64_blob() {
    let identity = test_identity();
    let cert = checkout(CheckoutRequest::new(license_document("lic-1"), &identity))
        .expect("checkout");

    // Rewrap the blob at 60 columns, as the original issuer emits it.
    let body = cert
        .strip_prefix("-----BEGIN LICENSE FILE-----\n")
        .and_then(|s| s.strip_suffix("-----END LICENSE FILE-----\n"))
        .unwrap()
        .trim_end();
    let wrapped: Vec<String> = body
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8(chunk.to_vec()).unwrap())
        .collect();
    let rewrapped = format!(
        "-----BEGIN LICENSE FILE-----\n{}\n-----END LICENSE FILE-----\n",
        wrapped.join("\n")
    );

    let verified = verify(&rewrapped, &identity.verifying(), None).expect("verify");
    assert_eq!(verified.envelope().data["id"], "lic-1");
}

#[test]
fn missing_armor_header_is_malformed() {
    let identity = test_identity();
    let cert = checkout(CheckoutRequest::new(license_document("lic-1"), &identity))
        .expect("checkout");
    let stripped = cert.replace("-----BEGIN LICENSE FILE-----\n", "");

    let err = verify(&stripped, &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::MalformedCertificate(_)));
}

#[test]
fn missing_armor_footer_is_malformed() {
    let identity = test_identity();
    let cert = checkout(CheckoutRequest::new(license_document("lic-1"), &identity))
        .expect("checkout");
    let stripped = cert.replace("-----END LICENSE FILE-----\n", "");

    let err = verify(&stripped, &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::MalformedCertificate(_)));
}

#[test]
fn invalid_blob_base64_is_malformed() {
    let identity = test_identity();
    let armored =
        "-----BEGIN LICENSE FILE-----\n!!not base64!!\n-----END LICENSE FILE-----\n";

    let err = verify(armored, &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::MalformedCertificate(_)));
}

#[test]
fn certificate_missing_keys_is_malformed() {
    let identity = test_identity();
    let partial = serde_json::json!({ "enc": "abc", "alg": "base64+ed25519" });

    let err = verify(&common::rearmor(&partial), &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::MalformedCertificate(_)));
}

#[test]
fn unknown_algorithm_is_unsupported() {
    let identity = test_identity();
    let cert = checkout(CheckoutRequest::new(license_document("lic-1"), &identity))
        .expect("checkout");

    let mut json = common::unarmor(&cert);
    json["alg"] = serde_json::Value::String("base64+dsa".to_string());

    let err = verify(&common::rearmor(&json), &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::UnsupportedAlgorithm(alg) if alg == "base64+dsa"));
}

#[test]
fn valid_signature_over_garbage_payload_is_malformed_payload() {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let identity = test_identity();
    let enc = STANDARD.encode(b"not an envelope");
    let signature = common::test_ed25519_key().sign(format!("license/{enc}").as_bytes());
    let cert = serde_json::json!({
        "enc": enc,
        "sig": STANDARD.encode(signature.to_bytes()),
        "alg": "base64+ed25519",
    });

    let err = verify(&common::rearmor(&cert), &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::MalformedPayload(_)));
}

// ── Decryption ───────────────────────────────────────────────────

#[test]
fn encrypted_certificate_requires_secret() {
    let identity = test_identity();
    let request =
        CheckoutRequest::new(license_document("lic-1"), &identity).encrypt(license_secret());
    let cert = checkout(request).expect("checkout");

    let err = verify(&cert, &identity.verifying(), None).unwrap_err();
    assert!(matches!(err, LicenseFileError::InvalidLicense(_)));
}

#[test]
fn wrong_secret_fails_with_decryption_error() {
    let identity = test_identity();
    let request =
        CheckoutRequest::new(license_document("lic-1"), &identity).encrypt(license_secret());
    let cert = checkout(request).expect("checkout");

    let err = verify(&cert, &identity.verifying(), Some("wrong-secret")).unwrap_err();
    assert!(matches!(err, LicenseFileError::Decryption(_)));
}

#[test]
fn encrypted_round_trip_recovers_envelope() {
    let identity = test_identity();
    let request = CheckoutRequest::new(license_document("lic-1"), &identity)
        .encrypt(license_secret())
        .include(["product"]);
    let cert = checkout(request).expect("checkout");

    let secret = license_secret();
    let verified = verify(&cert, &identity.verifying(), Some(&secret)).expect("verify");
    assert_eq!(verified.envelope().data["id"], "lic-1");
    assert_eq!(verified.envelope().included.len(), 1);
}
