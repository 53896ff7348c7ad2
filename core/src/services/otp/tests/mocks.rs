//! Mock implementations for testing the OTP service

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;

use crate::domain::entities::otp_record::OtpRecord;
use crate::services::otp::traits::{OtpStore, SmsGateway};
use crate::services::otp::types::VerifyOutcome;

// Mock SMS gateway for testing
pub struct MockSmsGateway {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockSmsGateway {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(phone).cloned()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("SMS gateway error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

// Mock store for testing; mirrors the in-memory store semantics on a
// plain mutex so service tests do not depend on the infra crate.
pub struct MockOtpStore {
    pub records: Arc<Mutex<HashMap<String, OtpRecord>>>,
    pub should_fail: bool,
}

impl MockOtpStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn contains(&self, phone: &str) -> bool {
        self.records.lock().unwrap().contains_key(phone)
    }

    pub fn stored_code(&self, phone: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .get(phone)
            .map(|r| r.code.clone())
    }
}

#[async_trait]
impl OtpStore for MockOtpStore {
    async fn put(&self, phone: &str, code: &str, now: Instant) -> Result<(), String> {
        if self.should_fail {
            return Err("store error".to_string());
        }
        self.records
            .lock()
            .unwrap()
            .insert(phone.to_string(), OtpRecord::new(phone, code, now));
        Ok(())
    }

    async fn verify(
        &self,
        phone: &str,
        candidate: &str,
        now: Instant,
    ) -> Result<VerifyOutcome, String> {
        if self.should_fail {
            return Err("store error".to_string());
        }

        let mut records = self.records.lock().unwrap();
        let outcome = match records.get_mut(phone) {
            None => return Ok(VerifyOutcome::NotFound),
            Some(record) if record.is_expired(now) => VerifyOutcome::Expired,
            Some(record) if record.attempts_remaining == 0 => VerifyOutcome::AttemptsExhausted,
            Some(record) if record.matches(candidate) => VerifyOutcome::Success,
            Some(record) => {
                record.attempts_remaining -= 1;
                VerifyOutcome::Mismatch {
                    attempts_remaining: record.attempts_remaining,
                }
            }
        };

        match outcome {
            VerifyOutcome::Expired
            | VerifyOutcome::AttemptsExhausted
            | VerifyOutcome::Success
            | VerifyOutcome::Mismatch {
                attempts_remaining: 0,
            } => {
                records.remove(phone);
            }
            _ => {}
        }

        Ok(outcome)
    }
}
