//! OTP store implementations
//!
//! The in-memory store is the single-process default. The seam it fills
//! (`otp_core::OtpStore`) is deliberately small so a distributed cache can
//! replace it without touching the service layer.

pub mod memory;

pub use memory::InMemoryOtpStore;
