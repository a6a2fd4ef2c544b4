use std::fmt;

use crate::errors::CustomError;

pub const ADDRESS_PREFIX: &str = "0x";
pub const ADDRESS_LENGTH: usize = 42;

/// A wallet address that passed the shape check: `0x` prefix, 42 characters.
///
/// Only the shape is checked. Hex digits and the EIP-55 checksum are left to
/// the provider, which rejects malformed addresses on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(input: &str) -> Result<Self, CustomError> {
        let candidate = input.trim();
        if candidate.is_empty() {
            return Err(CustomError::EmptyInput);
        }
        if !candidate.starts_with(ADDRESS_PREFIX) || candidate.len() != ADDRESS_LENGTH {
            return Err(CustomError::InvalidFormat);
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
