//! Decimal currency amounts parsed into a scaled integer.
//!
//! `"12.25"` becomes `units = 1225, scale = 2`. Keeping the exact digits
//! avoids the float rounding that can misclassify amounts at cent
//! boundaries.

use std::str::FromStr;

/// Fraction digits beyond this are rejected so the scaled value fits in `i128`.
const MAX_SCALE: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    units: i128,
    scale: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount has no digits")]
    NoDigits,
    #[error("unexpected character '{0}' in amount")]
    InvalidCharacter(char),
    #[error("amount has more than 18 fraction digits")]
    TooPrecise,
    #[error("amount is out of range")]
    Overflow,
}

impl Amount {
    /// Value scaled to cents, truncated toward zero.
    pub fn cents(&self) -> Result<i128, AmountError> {
        if self.scale <= 2 {
            self.units
                .checked_mul(10_i128.pow(2 - self.scale))
                .ok_or(AmountError::Overflow)
        } else {
            Ok(self.units / 10_i128.pow(self.scale - 2))
        }
    }

    /// `ceil(self * numerator / denominator)`; non-positive results clamp to zero.
    pub fn ceil_fraction(&self, numerator: i128, denominator: i128) -> u64 {
        let scaled_numerator = self.units.saturating_mul(numerator);
        let scaled_denominator = denominator.saturating_mul(10_i128.pow(self.scale));
        if scaled_numerator <= 0 || scaled_denominator <= 0 {
            return 0;
        }
        let quotient = scaled_numerator / scaled_denominator;
        let rounded = if scaled_numerator % scaled_denominator == 0 {
            quotient
        } else {
            quotient + 1
        };
        u64::try_from(rounded).unwrap_or(u64::MAX)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, digits) = match value.as_bytes()[0] {
            b'-' => (true, &value[1..]),
            b'+' => (false, &value[1..]),
            _ => (false, value),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountError::NoDigits);
        }

        let scale = u32::try_from(fraction.len()).map_err(|_| AmountError::TooPrecise)?;
        if scale > MAX_SCALE {
            return Err(AmountError::TooPrecise);
        }

        let mut units: i128 = 0;
        for ch in whole.chars().chain(fraction.chars()) {
            let digit = ch.to_digit(10).ok_or(AmountError::InvalidCharacter(ch))?;
            units = units
                .checked_mul(10)
                .and_then(|acc| acc.checked_add(i128::from(digit)))
                .ok_or(AmountError::Overflow)?;
        }

        Ok(Self {
            units: if negative { -units } else { units },
            scale,
        })
    }
}
