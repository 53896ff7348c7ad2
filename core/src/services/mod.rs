//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    generate_code, mask_phone, normalize_phone, OtpResponse, OtpService, OtpStore, SendOtpResult,
    SmsGateway, VerifyOutcome,
};
