//! Fixed-point monetary amounts stored as integer micros.
//!
//! One pound is `1_000_000` micros, so £1.23 is held as `1_230_000`. Every
//! operation that mixes a [`Money`] with an `f64` first quantizes the float to
//! micros with round-half-to-even, then continues in integer arithmetic.
//!
//! The representable range is `i64` micros, roughly ±£9.2 trillion. Parsing
//! rejects amounts outside it; arithmetic saturates at [`Money::MIN`] and
//! [`Money::MAX`]. Use [`Money::checked_mul`] where saturation would hide an
//! out-of-range result.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Micros per whole currency unit.
pub const UNIT: i64 = 1_000_000;

const SCALE: u32 = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid amount: '{input}'")]
    InvalidAmount { input: String },
}

/// A signed monetary amount with six fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MIN: Money = Money(i64::MIN);
    pub const MAX: Money = Money(i64::MAX);

    /// Whole units scale exactly. `amount` must stay within ±9_223_372_036_854
    /// or the multiplication overflows; see [`Money::checked_from_int`].
    pub const fn from_int(amount: i64) -> Self {
        Money(amount * UNIT)
    }

    /// `None` when `amount` whole units do not fit in the micros range.
    pub const fn checked_from_int(amount: i64) -> Option<Self> {
        match amount.checked_mul(UNIT) {
            Some(micros) => Some(Money(micros)),
            None => None,
        }
    }

    /// Rounds to the nearest micro, ties to even. Out-of-range values
    /// saturate and NaN becomes zero.
    pub fn from_float(amount: f64) -> Self {
        Money(quantize(amount))
    }

    /// Like [`Money::from_float`], but `None` for NaN, infinities and values
    /// outside the micros range.
    pub fn checked_from_float(amount: f64) -> Option<Self> {
        let scaled = (amount * UNIT as f64).round_ties_even();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
            Some(Money(scaled as i64))
        } else {
            None
        }
    }

    /// Amount in millionths of a unit.
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Raw micros value.
    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Multiply as `*` does, but `None` when the product leaves the micros
    /// range instead of saturating.
    pub fn checked_mul(self, factor: f64) -> Option<Money> {
        let factor = quantize(factor) as i128;
        i64::try_from(self.0 as i128 * factor / UNIT as i128)
            .ok()
            .map(Money)
    }

    /// Exact decimal value of this amount.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    /// Render with exactly `digits` fractional digits, rounding half to even
    /// at the last digit. `(Money::from_int(66) + 0.498).format(1)` is `"66.5"`.
    pub fn format(self, digits: u32) -> String {
        let mut rounded = self
            .to_decimal()
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(digits);
        rounded.to_string()
    }
}

/// Scale by [`UNIT`] and round half to even, saturating.
fn quantize(amount: f64) -> i64 {
    round_micros(amount * UNIT as f64)
}

fn round_micros(scaled: f64) -> i64 {
    scaled.round_ties_even() as i64
}

impl Mul<f64> for Money {
    type Output = Money;

    /// The factor is quantized to micros before multiplying; the product is
    /// rescaled with integer division, which truncates toward zero.
    fn mul(self, factor: f64) -> Money {
        self.checked_mul(factor).unwrap_or_else(|| {
            if (self.0 < 0) == (factor < 0.0) {
                Money::MAX
            } else {
                Money::MIN
            }
        })
    }
}

impl Div<f64> for Money {
    type Output = Money;

    /// Dividing by zero returns the amount unchanged. So does a divisor too
    /// small to survive quantization.
    fn div(self, divisor: f64) -> Money {
        if divisor == 0.0 {
            return self;
        }
        let factor = quantize(divisor);
        if factor == 0 {
            return self;
        }
        Money(round_micros(self.0 as f64 / factor as f64 * UNIT as f64))
    }
}

impl Add<f64> for Money {
    type Output = Money;

    fn add(self, amount: f64) -> Money {
        Money(self.0.saturating_add(quantize(amount)))
    }
}

impl Sub<f64> for Money {
    type Output = Money;

    fn sub(self, amount: f64) -> Money {
        Money(self.0.saturating_sub(quantize(amount)))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses as an `f64`, then quantizes. Infinities, NaN and amounts
    /// outside the micros range are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<f64>()
            .ok()
            .and_then(Money::checked_from_float)
            .ok_or_else(|| MoneyError::InvalidAmount {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(2))
    }
}

/// Accepts JSON integers (exact), floats (quantized) or decimal strings.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a monetary amount as a number or decimal string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Money::checked_from_int(v).ok_or_else(|| E::custom(format!("amount out of range: {v}")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                let v = i64::try_from(v)
                    .map_err(|_| E::custom(format!("amount out of range: {v}")))?;
                self.visit_i64(v)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Money::checked_from_float(v)
                    .ok_or_else(|| E::custom(format!("amount out of range: {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}
