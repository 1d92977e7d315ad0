use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A weight in kilograms, kept as an exact decimal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub Decimal);

impl Kilograms {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_whole(kg: u32) -> Self {
        Self(Decimal::from(kg))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Whole hundreds of kilograms, rounded toward zero.
    pub fn hundreds(self) -> Decimal {
        (self.0 / Decimal::ONE_HUNDRED).trunc()
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.0.normalize())
    }
}
