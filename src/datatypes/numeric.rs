//! Arbitrary-precision `xs:nonNegativeInteger` and `xs:positiveInteger`

use crate::datatypes::Datatype;
use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static INTEGER_LEXICAL: Lazy<Regex> = Lazy::new(|| Regex::new("^[+-]?[0-9]+$").unwrap());

/// Parse the `xs:integer` lexical form
fn parse_integer<T: Datatype>(value: &str) -> Result<BigInt> {
    if !INTEGER_LEXICAL.is_match(value) {
        return Err(T::invalid(value));
    }
    BigInt::from_str(value).map_err(|_| T::invalid(value))
}

/// An integer `v >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonNegativeInteger(BigInt);

impl Datatype for NonNegativeInteger {
    const VALIDATOR_NAME: &'static str = "NonNegativeIntegerType";
}

impl NonNegativeInteger {
    /// Validate that `value` is not negative
    pub fn new(value: impl Into<BigInt>) -> Result<Self> {
        let value = value.into();
        if value.is_negative() {
            return Err(Self::invalid(value.to_string()));
        }
        Ok(Self(value))
    }

    /// The integer value
    pub fn value(&self) -> &BigInt {
        &self.0
    }

    /// The value as `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl FromStr for NonNegativeInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_integer::<Self>(s)?)
    }
}

impl Serialize for NonNegativeInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl fmt::Display for NonNegativeInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An integer `v >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositiveInteger(BigInt);

impl Datatype for PositiveInteger {
    const VALIDATOR_NAME: &'static str = "PositiveIntegerType";
}

impl PositiveInteger {
    /// Validate that `value` is at least one
    pub fn new(value: impl Into<BigInt>) -> Result<Self> {
        let value = value.into();
        if value < BigInt::one() {
            return Err(Self::invalid(value.to_string()));
        }
        Ok(Self(value))
    }

    /// The integer value
    pub fn value(&self) -> &BigInt {
        &self.0
    }

    /// The value as `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl FromStr for PositiveInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_integer::<Self>(s)?)
    }
}

impl Serialize for PositiveInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl fmt::Display for PositiveInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
