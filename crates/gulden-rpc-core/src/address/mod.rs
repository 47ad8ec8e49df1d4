//! Gulden address validation.
//!
//! Two tiers: [`validate_format`] is a cheap structural check with no
//! decoding, [`validate`] additionally decodes the address and verifies its
//! double-SHA-256 checksum. Both are total and never report errors.

pub mod base58;

use bitcoin::hashes::{sha256d, Hash};

use crate::error::DecodeError;

use self::base58::DECODED_LEN;

/// Marker letter every address starts with, accepted in either case.
pub const ADDRESS_MARKER: char = 'G';

/// Allowed number of base-58 characters after the marker.
pub const BODY_LEN_RANGE: std::ops::RangeInclusive<usize> = 25..=34;

const CHECKSUM_LEN: usize = 4;
const CHECKED_LEN: usize = DECODED_LEN - CHECKSUM_LEN;

// ==============================================================================
// Decoded Address
// ==============================================================================

/// The 25 bytes an address decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedAddress([u8; DECODED_LEN]);

impl DecodedAddress {
    pub fn decode(address: &str) -> Result<Self, DecodeError> {
        base58::decode(address).map(Self)
    }

    pub fn version(&self) -> u8 {
        self.0[0]
    }

    /// The 20-byte public key hash.
    pub fn payload(&self) -> &[u8] {
        &self.0[1..CHECKED_LEN]
    }

    pub fn checksum(&self) -> &[u8] {
        &self.0[CHECKED_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8; DECODED_LEN] {
        &self.0
    }

    /// Whether the trailing 4 bytes equal the first 4 bytes of
    /// `SHA256(SHA256(version || payload))`.
    pub fn has_valid_checksum(&self) -> bool {
        let digest = sha256d::Hash::hash(&self.0[..CHECKED_LEN]).to_byte_array();
        digest[..CHECKSUM_LEN] == *self.checksum()
    }
}

// ==============================================================================
// Validation
// ==============================================================================

/// Structural check: marker letter followed by 25 to 34 base-58 characters.
pub fn validate_format(address: &str) -> bool {
    let mut chars = address.chars();
    let Some(marker) = chars.next() else {
        return false;
    };
    if !marker.eq_ignore_ascii_case(&ADDRESS_MARKER) {
        return false;
    }

    let body = chars.as_str();
    BODY_LEN_RANGE.contains(&body.len())
        && body.bytes().all(|b| base58::digit_value(b).is_some())
}

/// Full validation: format, base-58 decoding, and checksum.
pub fn validate(address: &str) -> bool {
    if !validate_format(address) {
        return false;
    }

    match DecodedAddress::decode(address) {
        Ok(decoded) => decoded.has_valid_checksum(),
        Err(_) => false,
    }
}
