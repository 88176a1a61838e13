//! Reversible additive stream cipher and check digits
//!
//! The cipher is trivial byte arithmetic, not a security primitive: byte
//! parity picks the direction of the key stream. Even offsets subtract the
//! key, odd offsets add it; `encode` applies the per-parity inverse. The
//! direction per parity is pinned by the fixture regression tests: the
//! opposite assignment decodes no candidate window to a valid plaintext.
//!
//! The last two plaintext bytes are check digits derived from the candidate
//! window; a key is accepted only when both digits verify.

use crate::config::CIPHERTEXT_LEN;

/// Decode the ciphertext under a candidate key.
pub fn decode(ciphertext: &[u8; CIPHERTEXT_LEN], key: u8) -> [u8; CIPHERTEXT_LEN] {
    let mut plaintext = [0u8; CIPHERTEXT_LEN];
    for (i, (out, &byte)) in plaintext.iter_mut().zip(ciphertext.iter()).enumerate() {
        *out = if i % 2 == 0 {
            byte.wrapping_sub(key)
        } else {
            byte.wrapping_add(key)
        };
    }
    plaintext
}

/// Per-parity inverse of [`decode`]; `encode(decode(ct, k), k) == ct`.
pub fn encode(plaintext: &[u8; CIPHERTEXT_LEN], key: u8) -> [u8; CIPHERTEXT_LEN] {
    let mut ciphertext = [0u8; CIPHERTEXT_LEN];
    for (i, (out, &byte)) in ciphertext.iter_mut().zip(plaintext.iter()).enumerate() {
        *out = if i % 2 == 0 {
            byte.wrapping_add(key)
        } else {
            byte.wrapping_sub(key)
        };
    }
    ciphertext
}

/// First check digit: the penultimate plaintext byte must equal the key
/// shifted right once.
pub fn first_digit_check(plaintext: &[u8; CIPHERTEXT_LEN], key: u8) -> bool {
    plaintext[CIPHERTEXT_LEN - 2] == key >> 1
}

/// Second check digit: the final plaintext byte must equal the integer
/// quotient of the squared key by the previous prime in the window.
///
/// Widened to u16 so the square cannot overflow; `prev_prime >= 2` for every
/// window the oracle produces, so the division is total.
pub fn second_digit_check(plaintext: &[u8; CIPHERTEXT_LEN], key: u8, prev_prime: u8) -> bool {
    let quotient = (u16::from(key) * u16::from(key)) / u16::from(prev_prime);
    quotient == u16::from(plaintext[CIPHERTEXT_LEN - 1])
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
