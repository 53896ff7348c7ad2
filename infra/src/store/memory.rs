//! In-memory OTP store with lazy expiry
//!
//! A single `RwLock`-guarded map keyed by canonical phone number. Per-key
//! atomicity of the decrement-and-maybe-delete step in `verify` comes from
//! the store-wide write lock; OTP traffic per phone is low-frequency, so a
//! global lock is sufficient granularity. No I/O ever happens while the
//! lock is held.
//!
//! Expiry is enforced lazily at verification time, so correctness needs no
//! background task. `start_janitor` adds an optional periodic sweep that
//! only bounds memory growth from abandoned records; it does not change
//! verification semantics.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use otp_core::domain::entities::otp_record::OtpRecord;
use otp_core::services::otp::{mask_phone, OtpStore, VerifyOutcome};

/// In-memory implementation of [`OtpStore`]
///
/// Holds at most one record per phone. Records are removed, never flagged:
/// on successful verification, on the attempt budget reaching zero, when
/// superseded by a new `put`, and lazily when found expired.
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Whether a record currently exists for `phone`.
    pub async fn contains(&self, phone: &str) -> bool {
        self.records.read().await.contains_key(phone)
    }

    /// Number of records currently held, including expired-but-unswept ones.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Remove every record whose TTL has elapsed as of `now`.
    ///
    /// Returns the number of records removed.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }

    /// Spawn a periodic sweep of expired records.
    ///
    /// Purely a memory bound for abandoned records; verification reads the
    /// clock itself, so a stopped or slow janitor never affects outcomes.
    pub fn start_janitor(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = self.sweep(Instant::now()).await;
                if removed > 0 {
                    debug!(removed, "swept expired OTP records");
                }
            }
        })
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, phone: &str, code: &str, now: Instant) -> Result<(), String> {
        let mut records = self.records.write().await;
        records.insert(phone.to_string(), OtpRecord::new(phone, code, now));

        debug!(
            phone = %mask_phone(phone),
            "stored OTP record"
        );

        Ok(())
    }

    async fn verify(
        &self,
        phone: &str,
        candidate: &str,
        now: Instant,
    ) -> Result<VerifyOutcome, String> {
        let mut records = self.records.write().await;

        // Expiry is checked before the attempt budget: an expired record
        // reports Expired even when attempts are already spent.
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
            // Terminal states remove the record; a mismatch that zeroed the
            // budget removes it too, while still reporting Mismatch for
            // this call.
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
