//! Mock SMS Gateway Implementation
//!
//! Logs deliveries instead of sending them. Captures the last code per
//! phone so development flows and tests can complete verification without
//! a real gateway.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use otp_core::services::otp::{mask_phone, SmsGateway};

/// Mock SMS gateway for development and testing
#[derive(Clone, Default)]
pub struct MockSmsGateway {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last code delivered per phone number
    sent_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock gateway that fails every send.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Total number of messages sent.
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// The last code delivered to `phone`, if any.
    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(phone).cloned()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                phone = %mask_phone(phone),
                "Mock SMS gateway simulating delivery failure"
            );
            return Err("Simulated SMS delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.sent_codes
            .lock()
            .map_err(|_| "mock gateway state poisoned".to_string())?
            .insert(phone.to_string(), code.to_string());

        info!(
            provider = "mock",
            phone = %mask_phone(phone),
            message_id = %message_id,
            message_number = count,
            "SMS sent (mock)"
        );

        Ok(message_id)
    }
}
