//! One-time code generation.

use rand::Rng;

use crate::config::VerificationConfig;

/// Draws a uniformly random code with exactly `code_digits` digits.
///
/// The range starts at a non-zero leading digit, so the result is never the
/// `NO_PENDING_CODE` sentinel.
pub fn generate_code(config: &VerificationConfig) -> i32 {
    rand::rng().random_range(config.code_range())
}
