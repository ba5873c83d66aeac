//! Exact money amounts.
//!
//! Every monetary value in a ledger is an arbitrary-precision rational. Parsing a
//! decimal literal never goes through a float, so `0.1 + 0.2` is exactly `0.3`, and
//! splitting an expense three ways keeps the exact thirds.

use core::iter::Sum;
use core::num::NonZeroUsize;
use core::ops::{Add, AddAssign, Sub};
use core::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Largest decimal exponent accepted by the parser (`1e4096`).
const MAX_EXPONENT: u64 = 4096;

/// Failure to read a literal as an exact amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse {input:?} as an exact amount: {reason}")]
pub struct ParseAmountError {
    pub input: String,
    pub reason: &'static str,
}

impl ParseAmountError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// An exact rational amount of money.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigRational);

impl Amount {
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Equal share of this amount across `parts` participants. Exact, no rounding.
    pub fn split(&self, parts: NonZeroUsize) -> Amount {
        Amount(&self.0 / BigRational::from_integer(BigInt::from(parts.get())))
    }

    /// Decimal rendering with exactly `places` fractional digits.
    ///
    /// Rounds half away from zero. A negative value that rounds to zero is rendered
    /// without a sign. Sheets produced by the older JavaScript tool truncated instead,
    /// so a cell there can read one unit of the last place lower than here.
    pub fn to_decimal(&self, places: usize) -> String {
        let scale = BigRational::from_integer(num_traits::pow(BigInt::from(10u8), places));
        let scaled = (&self.0 * scale).round().to_integer();
        let sign = if scaled.is_negative() { "-" } else { "" };
        let digits = format!("{:0>width$}", scaled.abs().to_string(), width = places + 1);
        let (int_part, frac_part) = digits.split_at(digits.len() - places);
        if places == 0 {
            format!("{sign}{int_part}")
        } else {
            format!("{sign}{int_part}.{frac_part}")
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigRational> for Amount {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }
}

/// Prints the exact value: `5`, `-12`, `7/3`.
impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Accepts integer (`12`), decimal (`12.50`, `.5`), exponent (`1.5e2`) and
/// fraction (`1/3`) literals, optionally signed.
impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Some((numer, denom)) = text.split_once('/') {
            let numer = parse_decimal(numer.trim()).map_err(|reason| ParseAmountError::new(s, reason))?;
            let denom = parse_decimal(denom.trim()).map_err(|reason| ParseAmountError::new(s, reason))?;
            if denom.is_zero() {
                return Err(ParseAmountError::new(s, "zero denominator"));
            }
            return Ok(Amount(numer / denom));
        }
        parse_decimal(text)
            .map(Amount)
            .map_err(|reason| ParseAmountError::new(s, reason))
    }
}

fn parse_decimal(text: &str) -> Result<BigRational, &'static str> {
    let (negative, unsigned) = match text.as_bytes().first() {
        None => return Err("empty literal"),
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        Some(_) => (false, text),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => {
            let exponent = unsigned[pos + 1..]
                .parse::<i64>()
                .map_err(|_| "invalid exponent")?;
            (&unsigned[..pos], exponent)
        }
        None => (unsigned, 0),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err("no digits");
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err("not a decimal number");
    }

    if exponent.unsigned_abs() > MAX_EXPONENT {
        return Err("exponent out of range");
    }
    let scale = exponent - frac_part.len() as i64;

    let digits: BigInt = format!("{int_part}{frac_part}")
        .parse()
        .map_err(|_| "not a decimal number")?;
    let factor = BigRational::from_integer(num_traits::pow(BigInt::from(10u8), scale.unsigned_abs() as usize));
    let mut value = BigRational::from_integer(digits);
    if scale >= 0 {
        value *= factor;
    } else {
        value /= factor;
    }

    Ok(if negative { -value } else { value })
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn sub(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 - &rhs.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
