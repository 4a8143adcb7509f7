//! Pluggable fare algorithm.
//!
//! The specialized regional service and the generic default are both
//! implementations; the specialized one wraps a default as its fallback.

use crate::identifiers::CurrencyCode;
use crate::models::{fare::Fare, ride::Ride, types::FareType};
use crate::rules::table::FareRuleTable;

/// Computes fares for an itinerary
pub trait FareAlgorithm: Send + Sync {
    /// Add the price of `rides` under `fare_type` to `fare`.
    ///
    /// Returns whether any price was found. Must not fail: missing rules
    /// contribute nothing.
    fn populate_fare(
        &self,
        fare: &mut Fare,
        fare_type: &FareType,
        rides: &[Ride],
        rules: &FareRuleTable,
    ) -> bool;

    /// Price `rides` under every fare type, `None` if nothing was priced.
    fn calculate(
        &self,
        currency: CurrencyCode,
        rides: &[Ride],
        rules: &FareRuleTable,
        fare_types: &[FareType],
    ) -> Option<Fare> {
        let mut fare = Fare::new(currency);
        let mut has_price = false;
        for fare_type in fare_types {
            has_price |= self.populate_fare(&mut fare, fare_type, rides, rules);
        }
        has_price.then_some(fare)
    }
}

impl<T: FareAlgorithm + ?Sized> FareAlgorithm for Box<T> {
    fn populate_fare(
        &self,
        fare: &mut Fare,
        fare_type: &FareType,
        rides: &[Ride],
        rules: &FareRuleTable,
    ) -> bool {
        (**self).populate_fare(fare, fare_type, rides, rules)
    }
}

impl<T: FareAlgorithm + ?Sized> FareAlgorithm for &T {
    fn populate_fare(
        &self,
        fare: &mut Fare,
        fare_type: &FareType,
        rides: &[Ride],
        rules: &FareRuleTable,
    ) -> bool {
        (**self).populate_fare(fare, fare_type, rides, rules)
    }
}
