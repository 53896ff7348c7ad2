//! 2factor.in SMS Gateway Implementation
//!
//! Delivers one-time codes through the 2factor.in OTP API. The API is a
//! single GET per message:
//!
//! `{base_url}/{api_key}/SMS/{subscriber}/{code}/OTP1`
//!
//! where `subscriber` is the bare 10-digit number (no `+91` prefix). The
//! response is JSON `{"Status": "Success", "Details": "<session id>"}`.
//! The API key is part of the URL and must never be logged.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use otp_core::services::otp::{mask_phone, SmsGateway};

use crate::InfrastructureError;

/// 2factor.in gateway configuration
#[derive(Debug, Clone)]
pub struct TwoFactorConfig {
    /// 2factor.in API key (the one required secret)
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for TwoFactorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://2factor.in/API/V1".to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 10,
        }
    }
}

impl TwoFactorConfig {
    /// Create configuration from environment variables.
    ///
    /// `TWO_FACTOR_API_KEY` is required; its absence is a startup-time
    /// configuration error.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_key = std::env::var("TWO_FACTOR_API_KEY")
            .map_err(|_| InfrastructureError::Config("TWO_FACTOR_API_KEY not set".to_string()))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("TWO_FACTOR_BASE_URL")
                .unwrap_or_else(|_| "https://2factor.in/API/V1".to_string()),
            max_retries: std::env::var("TWO_FACTOR_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("TWO_FACTOR_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("TWO_FACTOR_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

/// Response body returned by the 2factor.in SMS endpoint
#[derive(Debug, Deserialize)]
struct TwoFactorResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Details")]
    details: String,
}

/// 2factor.in SMS gateway implementation
pub struct TwoFactorSmsGateway {
    client: reqwest::Client,
    config: TwoFactorConfig,
}

impl TwoFactorSmsGateway {
    /// Create a new 2factor.in gateway.
    pub fn new(config: TwoFactorConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "2factor.in API key must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("2factor.in SMS gateway initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(TwoFactorConfig::from_env()?)
    }

    /// Build the request URL for one delivery.
    ///
    /// 2factor.in expects the bare subscriber number, so the canonical
    /// `+91` prefix is stripped.
    fn request_url(&self, phone: &str, code: &str) -> String {
        let subscriber = phone.strip_prefix("+91").unwrap_or(phone);
        format!(
            "{}/{}/SMS/{}/{}/OTP1",
            self.config.base_url, self.config.api_key, subscriber, code
        )
    }

    /// Send with retry on transient failures.
    async fn send_with_retry(&self, phone: &str, code: &str) -> Result<String, InfrastructureError> {
        let url = self.request_url(phone, code);
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        for attempt in 1..=self.config.max_retries {
            debug!(
                phone = %mask_phone(phone),
                attempt,
                max_attempts = self.config.max_retries,
                "Sending OTP via 2factor.in"
            );

            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let body: TwoFactorResponse = response.json().await?;
                        if body.status == "Success" {
                            info!(
                                phone = %mask_phone(phone),
                                session_id = %body.details,
                                "OTP delivered via 2factor.in"
                            );
                            return Ok(body.details);
                        }
                        // The API reported a business failure; retrying the
                        // same request will not change the answer.
                        return Err(InfrastructureError::Sms(format!(
                            "2factor.in rejected the message: {}",
                            body.details
                        )));
                    }

                    if (status.is_server_error() || status.as_u16() == 429)
                        && attempt < self.config.max_retries
                    {
                        warn!(
                            phone = %mask_phone(phone),
                            status = status.as_u16(),
                            "Transient 2factor.in failure, retrying after {:?}",
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                        continue;
                    }

                    return Err(InfrastructureError::Sms(format!(
                        "2factor.in request failed with status {}",
                        status
                    )));
                }
                Err(e) if attempt < self.config.max_retries => {
                    warn!(
                        phone = %mask_phone(phone),
                        error = %e,
                        "2factor.in request error, retrying after {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    error!(
                        phone = %mask_phone(phone),
                        error = %e,
                        "2factor.in request failed after {} attempts",
                        self.config.max_retries
                    );
                    return Err(InfrastructureError::Http(e));
                }
            }
        }

        Err(InfrastructureError::Sms(
            "2factor.in delivery failed after all retries".to_string(),
        ))
    }
}

#[async_trait]
impl SmsGateway for TwoFactorSmsGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        self.send_with_retry(phone, code)
            .await
            .map_err(|e| e.to_string())
    }
}
