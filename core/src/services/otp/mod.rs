//! OTP service module for SMS-based phone authentication
//!
//! This module provides the complete one-time-code workflow:
//! - Phone number canonicalization for Indian mobile numbers
//! - Cryptographically secure code generation
//! - Code storage and verification behind an injectable store trait
//! - Delivery through an injectable SMS gateway trait

mod generator;
mod phone;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use generator::generate_code;
pub use phone::{mask_phone, normalize_phone};
pub use service::OtpService;
pub use traits::{OtpStore, SmsGateway};
pub use types::{OtpResponse, SendOtpResult, VerifyOutcome};
