//! # Infrastructure Layer
//!
//! Concrete implementations behind the core seam traits:
//! - **Store**: in-memory OTP store with lazy expiry and an optional
//!   janitor sweep
//! - **SMS**: 2factor.in gateway client and a mock implementation for
//!   development and tests
//! - **Configuration**: environment-driven service configuration

/// Store module - in-memory OTP storage
pub mod store;

/// SMS gateway module - external SMS providers
pub mod sms;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! The SMS gateway secret is the one required configuration value;
    //! a missing key is a startup-time error, never a per-request one.

    use crate::InfrastructureError;

    /// SMS gateway configuration
    #[derive(Debug, Clone)]
    pub struct SmsConfig {
        /// SMS gateway provider ("2factor", "mock")
        pub provider: String,
        /// API key authenticating with the provider
        pub api_key: String,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                api_key: String::new(),
            }
        }
    }

    impl SmsConfig {
        /// Load the SMS configuration from the environment.
        ///
        /// `SMS_PROVIDER` selects the gateway (default "mock");
        /// `TWO_FACTOR_API_KEY` is required whenever the 2factor provider
        /// is selected.
        pub fn from_env() -> Result<Self, InfrastructureError> {
            dotenvy::dotenv().ok(); // Load .env file if present

            let provider =
                std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string());
            let api_key = std::env::var("TWO_FACTOR_API_KEY").unwrap_or_default();

            if provider == "2factor" && api_key.is_empty() {
                return Err(InfrastructureError::Config(
                    "TWO_FACTOR_API_KEY not set".to_string(),
                ));
            }

            Ok(Self { provider, api_key })
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS gateway error
    #[error("SMS gateway error: {0}")]
    Sms(String),
}
