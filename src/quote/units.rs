//! Numeric value types used by the quote engine.
//!
//! All arithmetic stays in integers: distance in hectometres (one decimal of a km),
//! durations in seconds, money in cents. Text rendering lives in [`super::format`].

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Distance with 0.1 km resolution
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Distance(u64);

impl Distance {
    pub const ZERO: Distance = Distance(0);

    /// Meters rounded half-up to one decimal of a kilometre
    pub fn from_meters(meters: u64) -> Self {
        Self(meters / 100 + u64::from(meters % 100 >= 50))
    }

    pub fn from_hectometers(hectometers: u64) -> Self {
        Self(hectometers)
    }

    pub fn hectometers(self) -> u64 {
        self.0
    }

    pub fn km(self) -> f64 {
        self.0 as f64 / 10.0
    }

    pub fn abs_diff(self, other: Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }
}

/// Saturates at `u64::MAX` hectometres
impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Travel time in whole seconds
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TravelTime(u64);

impl TravelTime {
    pub const ZERO: TravelTime = TravelTime(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn secs(self) -> u64 {
        self.0
    }

    /// Split into (hours, minutes, seconds). Hours are not wrapped into days.
    pub fn hms(self) -> (u64, u64, u64) {
        (self.0 / 3600, (self.0 % 3600) / 60, self.0 % 60)
    }

    pub fn abs_diff(self, other: Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }
}

/// Saturates at `u64::MAX` seconds
impl Add for TravelTime {
    type Output = TravelTime;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for TravelTime {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Currency amount in cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole units plus nano-units, keeping two fractional digits (truncated).
    /// `None` when the amount does not fit in cents.
    pub fn from_units_nanos(units: i64, nanos: i64) -> Option<Self> {
        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(nanos / 10_000_000))
            .map(Self)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn checked_times(self, factor: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(factor)).map(Self)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Saturates at `i64::MAX` cents
    pub fn abs_diff(self, other: Self) -> Self {
        Self(i64::try_from(self.0.abs_diff(other.0)).unwrap_or(i64::MAX))
    }
}
