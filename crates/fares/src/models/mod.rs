//! Fare data models and types.

pub mod fare;
pub mod ride;
pub mod rules;
pub mod types;

// Re-exports for convenience
pub use fare::{Fare, FareComponent, FareEntry, RouteTag};
pub use ride::Ride;
pub use rules::{FareAttribute, FareRuleSet, PriceTiers, TierPrices};
pub use types::{
    ExpressArea, FareError, FareType, Money, PassengerCategory, PaymentMethod, Result,
    RuleCategory, RuleTag,
};
