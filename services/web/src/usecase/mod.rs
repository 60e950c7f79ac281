use rand::RngExt;

use crate::domain::types::OTP_LEN;

pub mod customer;
pub mod login;
pub mod oauth;
pub mod password;
pub mod password_reset;
pub mod signup;

/// Generate a numeric one-time code (leading zeros allowed).
pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
