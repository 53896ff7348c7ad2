//! End-to-end tests wiring the OTP service to the in-memory store and the
//! mock SMS gateway.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use otp_core::services::otp::{OtpResponse, OtpService, OtpStore, VerifyOutcome};
use otp_infra::sms::MockSmsGateway;
use otp_infra::store::InMemoryOtpStore;

fn wire() -> (
    OtpService<MockSmsGateway, InMemoryOtpStore>,
    Arc<MockSmsGateway>,
    Arc<InMemoryOtpStore>,
) {
    let gateway = Arc::new(MockSmsGateway::new());
    let store = Arc::new(InMemoryOtpStore::new());
    let service = OtpService::new(gateway.clone(), store.clone());
    (service, gateway, store)
}

#[tokio::test]
async fn test_send_and_verify_roundtrip() {
    let (service, gateway, store) = wire();

    // A formatted input is stored under its canonical key
    let result = service.send_otp("+91 98765 43210").await.unwrap();
    assert_eq!(result.phone, "+919876543210");
    assert!(result.expires_at > Utc::now());
    assert!(store.contains("+919876543210").await);

    // Verification accepts any equivalent raw form
    let code = gateway.last_code("+919876543210").unwrap();
    let outcome = service.verify_otp("9876543210", &code).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Success);

    // The record is gone once consumed
    assert!(!store.contains("+919876543210").await);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_resend_supersedes_first_code() {
    let (service, gateway, store) = wire();

    service.send_otp("9876543210").await.unwrap();
    let first_code = gateway.last_code("+919876543210").unwrap();

    service.send_otp("9876543210").await.unwrap();
    assert_eq!(store.len().await, 1);

    let second_code = gateway.last_code("+919876543210").unwrap();
    if first_code != second_code {
        let outcome = service
            .verify_otp("9876543210", &first_code)
            .await
            .unwrap();
        assert!(
            !outcome.is_success(),
            "superseded code must not verify, got {:?}",
            outcome
        );
    }

    let outcome = service
        .verify_otp("9876543210", &second_code)
        .await
        .unwrap();
    assert_eq!(outcome, VerifyOutcome::Success);
}

#[tokio::test]
async fn test_boundary_response_shapes() {
    let (service, gateway, _store) = wire();

    let send = service.send_otp("09876543210").await.unwrap();
    let response = OtpResponse::from_send(&send);
    assert!(response.success);
    assert_eq!(response.phone, "+919876543210");

    let code = gateway.last_code("+919876543210").unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let outcome = service.verify_otp("9876543210", wrong).await.unwrap();
    let response = OtpResponse::from_outcome("+919876543210", &outcome);
    assert!(!response.success);
    assert_eq!(response.message, "Invalid OTP. Attempts remaining: 2");
}

/// Concurrent wrong-code verifications must consume the attempt budget
/// exactly once each: three `Mismatch` outcomes reporting 2, 1 and 0
/// remaining, everything else `NotFound`, and never a negative or repeated
/// count.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_verifies_never_race_on_attempts() {
    const TASKS: usize = 16;

    let store = Arc::new(InMemoryOtpStore::new());
    store
        .put("+919876543210", "123456", Instant::now())
        .await
        .unwrap();

    let mut handles = Vec::with_capacity(TASKS);
    for _ in 0..TASKS {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .verify("+919876543210", "999999", Instant::now())
                .await
                .unwrap()
        }));
    }

    let mut mismatch_remaining = Vec::new();
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            VerifyOutcome::Mismatch { attempts_remaining } => {
                mismatch_remaining.push(attempts_remaining)
            }
            VerifyOutcome::NotFound => not_found += 1,
            other => panic!("unexpected outcome under contention: {:?}", other),
        }
    }

    mismatch_remaining.sort_unstable();
    assert_eq!(mismatch_remaining, vec![0, 1, 2]);
    assert_eq!(not_found, TASKS - 3);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_failed_delivery_leaves_code_verifiable() {
    let gateway = Arc::new(MockSmsGateway::failing());
    let store = Arc::new(InMemoryOtpStore::new());
    let service = OtpService::new(gateway, store.clone());

    assert!(service.send_otp("9876543210").await.is_err());

    // The entry was written before the gateway call and survives it
    assert!(store.contains("+919876543210").await);
}
