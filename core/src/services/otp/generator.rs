//! One-time code generation

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::otp_record::CODE_LENGTH;

/// Generate a cryptographically secure random one-time code.
///
/// Uses `OsRng` (the OS-provided CSPRNG) so codes are not predictable from
/// prior outputs. The value is drawn uniformly from `000000..=999999`
/// (`gen_range` is rejection-sampled, so there is no modulo bias) and
/// zero-padded; leading zeros are allowed.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    let code: u32 = rng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = CODE_LENGTH)
}
