//! SMS Gateway Module
//!
//! Gateway implementations for delivering one-time codes:
//! - **2factor.in**: production delivery through the 2factor.in OTP API
//! - **Mock**: console/log output for development and tests

use std::sync::Arc;

use otp_core::services::otp::SmsGateway;

pub mod mock_sms;
pub mod two_factor;

pub use mock_sms::MockSmsGateway;
pub use two_factor::{TwoFactorConfig, TwoFactorSmsGateway};

use crate::config::SmsConfig;
use crate::InfrastructureError;

/// Create an SMS gateway based on configuration.
///
/// Unknown providers fall back to the mock implementation with a warning;
/// selecting "2factor" without an API key is a configuration error.
pub fn create_sms_gateway(
    config: &SmsConfig,
) -> Result<Arc<dyn SmsGateway>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => Ok(Arc::new(MockSmsGateway::new())),
        "2factor" => {
            let gateway = TwoFactorSmsGateway::new(TwoFactorConfig {
                api_key: config.api_key.clone(),
                ..TwoFactorConfig::default()
            })?;
            Ok(Arc::new(gateway))
        }
        other => {
            tracing::warn!(
                provider = other,
                "Unknown SMS provider, using mock implementation"
            );
            Ok(Arc::new(MockSmsGateway::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_mock_provider() {
        let config = SmsConfig {
            provider: "mock".to_string(),
            api_key: String::new(),
        };
        assert!(create_sms_gateway(&config).is_ok());
    }

    #[test]
    fn test_factory_unknown_provider_falls_back_to_mock() {
        let config = SmsConfig {
            provider: "carrier-pigeon".to_string(),
            api_key: String::new(),
        };
        assert!(create_sms_gateway(&config).is_ok());
    }

    #[test]
    fn test_factory_two_factor_requires_api_key() {
        let config = SmsConfig {
            provider: "2factor".to_string(),
            api_key: String::new(),
        };
        match create_sms_gateway(&config) {
            Err(InfrastructureError::Config(msg)) => assert!(msg.contains("API key")),
            _ => panic!("expected configuration error"),
        }
    }
}
