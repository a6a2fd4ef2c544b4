use ethers::types::U256;

use crate::errors::CustomError;

/// Parses a provider balance: `0x`-prefixed hex or a plain decimal integer.
/// A bare `0x` is zero, which is how some nodes encode an empty balance.
pub fn parse_raw_balance(raw: &str) -> Result<U256, CustomError> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some("") => Ok(U256::zero()),
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| format!("{e:?}")),
        None if raw.is_empty() => Err("empty balance".to_string()),
        None => U256::from_dec_str(raw).map_err(|e| format!("{e:?}")),
    };

    parsed.map_err(|e| CustomError::InvalidAmountError(format!("{raw} ({e})")))
}

/// Largest decimals value a token may declare.
pub const MAX_DECIMALS: u16 = 256;

/// Shifts the decimal point of `amount` left by `decimals` places.
///
/// Exact for the whole `U256` range. Trailing fractional zeros are dropped but
/// one fractional digit is always kept, so one whole token reads `1.0`. With
/// zero decimals there is no fractional part at all.
pub fn format_units(amount: U256, decimals: u16) -> String {
    let mut digits = amount.to_string();
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;

    if digits.len() <= decimals {
        digits.insert_str(0, &"0".repeat(decimals - digits.len() + 1));
    }

    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}
