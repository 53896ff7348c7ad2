//! # OTP Core
//!
//! Core business logic and domain layer for the phone OTP authentication
//! service. This crate contains the OTP record entity, the orchestration
//! service, the seam traits for SMS delivery and code storage, and the
//! error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
