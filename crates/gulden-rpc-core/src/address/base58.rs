//! Fixed-width base-58 decoding.
//!
//! Addresses always decode to exactly [`DECODED_LEN`] bytes, so this is a
//! plain base conversion into a 25-byte accumulator rather than a general
//! big-integer codec. Leading `1` digits are not given any special meaning.

use crate::error::DecodeError;

/// The 58 symbols in digit order. `0`, `O`, `I` and `l` are excluded.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Width of a decoded address: version byte, 20-byte payload, 4-byte checksum.
pub const DECODED_LEN: usize = 25;

const NOT_A_DIGIT: u8 = 0xFF;

static DIGIT_VALUES: [u8; 128] = build_digit_values();

const fn build_digit_values() -> [u8; 128] {
    let mut table = [NOT_A_DIGIT; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Value of a single base-58 digit, or `None` for anything outside the alphabet.
pub fn digit_value(byte: u8) -> Option<u8> {
    match DIGIT_VALUES.get(usize::from(byte)) {
        Some(&NOT_A_DIGIT) | None => None,
        Some(&value) => Some(value),
    }
}

/// Decode `input` into a big-endian 25-byte buffer.
///
/// Each digit is folded into the accumulator from the least significant byte
/// upwards; a carry left over after the most significant byte means the value
/// does not fit and the whole decode fails.
pub fn decode(input: &str) -> Result<[u8; DECODED_LEN], DecodeError> {
    let mut acc = [0u8; DECODED_LEN];

    for (position, character) in input.chars().enumerate() {
        let value = u8::try_from(character)
            .ok()
            .and_then(digit_value)
            .ok_or(DecodeError::InvalidCharacter {
                character,
                position,
            })?;

        let mut carry = u32::from(value);
        for byte in acc.iter_mut().rev() {
            carry += 58 * u32::from(*byte);
            *byte = (carry % 256) as u8;
            carry /= 256;
        }

        if carry != 0 {
            return Err(DecodeError::Overflow { width: DECODED_LEN });
        }
    }

    Ok(acc)
}
