//! Human-facing order number generation
//!
//! 15 random decimal digits with no leading zero. The generator is paired
//! with a bounded pre-check against the order table; the unique index on
//! `order_no` remains the real uniqueness guarantee.

use rand::Rng;

/// Order number length in digits
pub const ORDER_NO_LEN: usize = 15;

/// Regeneration attempts after the first draw collides
pub const MAX_RETRIES: usize = 3;

/// Generate a 15-digit numeric order number
///
/// A leading `0` is substituted with `1` (single fixed substitution, not a
/// re-roll), so the number always reads as 15 digits.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut digits: Vec<u8> = (0..ORDER_NO_LEN)
        .map(|_| b'0' + rng.gen_range(0..10u8))
        .collect();
    if digits[0] == b'0' {
        digits[0] = b'1';
    }
    String::from_utf8(digits).expect("digits are always valid UTF-8")
}
