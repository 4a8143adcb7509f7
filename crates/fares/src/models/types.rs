//! Core data types and enums for fare data.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use strum::EnumString;

use crate::identifiers::*;

// ============================================================================
// Money
// ============================================================================

/// An amount in minor currency units (cents).
///
/// The currency itself lives on the [`Fare`](crate::models::fare::Fare)
/// result, every amount of one computation shares it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `None` for a zero amount. Source data uses zero for "not configured".
    pub fn non_zero(self) -> Option<Self> {
        (!self.is_zero()).then_some(self)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// ============================================================================
// Enums
// ============================================================================

/// How the passenger pays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Passenger category a price tier is defined for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassengerCategory {
    Adult,
    Child,
    /// Seniors, students and other special-rate riders
    Tertiary,
}

/// Requested fare type
///
/// Parsing never fails: unrecognised tags become [`FareType::Other`], which
/// the engine prices at the base price.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FareType {
    Regular,
    Child,
    Youth,
    Senior,
    Student,
    Special,
    CashAdult,
    CashChild,
    CashTertiary,
    CardAdult,
    CardChild,
    CardTertiary,
    #[strum(default)]
    Other(String),
}

impl FareType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular => "regular",
            Self::Child => "child",
            Self::Youth => "youth",
            Self::Senior => "senior",
            Self::Student => "student",
            Self::Special => "special",
            Self::CashAdult => "cash-adult",
            Self::CashChild => "cash-child",
            Self::CashTertiary => "cash-tertiary",
            Self::CardAdult => "card-adult",
            Self::CardChild => "card-child",
            Self::CardTertiary => "card-tertiary",
            Self::Other(tag) => tag,
        }
    }

    /// Payment method implied by this fare type.
    ///
    /// The generic type and the plain passenger categories are paid in cash.
    pub fn payment(&self) -> Option<PaymentMethod> {
        match self {
            Self::Regular
            | Self::Child
            | Self::Youth
            | Self::Senior
            | Self::Student
            | Self::Special
            | Self::CashAdult
            | Self::CashChild
            | Self::CashTertiary => Some(PaymentMethod::Cash),
            Self::CardAdult | Self::CardChild | Self::CardTertiary => Some(PaymentMethod::Card),
            Self::Other(_) => None,
        }
    }

    pub fn passenger(&self) -> Option<PassengerCategory> {
        match self {
            Self::Regular | Self::CashAdult | Self::CardAdult => Some(PassengerCategory::Adult),
            Self::Child | Self::Youth | Self::CashChild | Self::CardChild => {
                Some(PassengerCategory::Child)
            }
            Self::Senior
            | Self::Student
            | Self::Special
            | Self::CashTertiary
            | Self::CardTertiary => Some(PassengerCategory::Tertiary),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for FareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-area of the express service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum ExpressArea {
    North,
    City,
}

/// What a rule prices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum RuleCategory {
    /// Flat fare for the maritime service
    Ferry,
    /// Flat fare for the airport express, split by sub-area
    Express(ExpressArea),
    /// Distance tier: number of zones touched
    Zones(u32),
}

impl RuleCategory {
    pub fn is_flat(&self) -> bool {
        !matches!(self, Self::Zones(_))
    }

    /// Label attached to fare components for breakdowns
    pub fn label(&self) -> String {
        match self {
            Self::Ferry => "FERRY".into(),
            Self::Express(ExpressArea::North) => "EXPRESS NORTH".into(),
            Self::Express(ExpressArea::City) => "EXPRESS CITY".into(),
            Self::Zones(n) => format!("{} ZONE", n),
        }
    }
}

/// Classification of a rule, fixed when the rule table is loaded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleTag {
    pub payment: Option<PaymentMethod>,
    pub category: Option<RuleCategory>,
}

impl RuleTag {
    pub fn new(payment: PaymentMethod, category: RuleCategory) -> Self {
        Self {
            payment: Some(payment),
            category: Some(category),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.payment.is_none() && self.category.is_none()
    }

    pub fn matches(&self, payment: PaymentMethod, category: RuleCategory) -> bool {
        self.payment == Some(payment) && self.category == Some(category)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("Duplicate rule: {0}")]
    DuplicateRule(RuleKey),

    #[error("Fare attribute not found: {0}")]
    FareNotFound(FareIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, FareError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(750).to_string(), "7.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-120).to_string(), "-1.20");
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [250, 300, 0].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(550));
        assert_eq!(Money::ZERO.non_zero(), None);
        assert_eq!(Money::from_cents(1).non_zero(), Some(Money::from_cents(1)));
    }

    #[test]
    fn test_fare_type_parse() {
        assert_eq!(FareType::from_str("regular").unwrap(), FareType::Regular);
        assert_eq!(FareType::from_str("card-child").unwrap(), FareType::CardChild);
        assert_eq!(FareType::from_str("Cash-Tertiary").unwrap(), FareType::CashTertiary);
        assert_eq!(
            FareType::from_str("tram").unwrap(),
            FareType::Other("tram".to_string())
        );
    }

    #[test]
    fn test_fare_type_classes() {
        assert_eq!(FareType::Regular.payment(), Some(PaymentMethod::Cash));
        assert_eq!(FareType::Senior.payment(), Some(PaymentMethod::Cash));
        assert_eq!(FareType::CardTertiary.payment(), Some(PaymentMethod::Card));
        assert_eq!(FareType::Other("tram".into()).payment(), None);

        assert_eq!(FareType::Youth.passenger(), Some(PassengerCategory::Child));
        assert_eq!(FareType::Student.passenger(), Some(PassengerCategory::Tertiary));
        assert_eq!(FareType::CardAdult.passenger(), Some(PassengerCategory::Adult));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(RuleCategory::Ferry.label(), "FERRY");
        assert_eq!(RuleCategory::Express(ExpressArea::North).label(), "EXPRESS NORTH");
        assert_eq!(RuleCategory::Zones(3).label(), "3 ZONE");
        assert!(!RuleCategory::Zones(3).is_flat());
    }
}
