//! # transit-fares
//!
//! Rule-table driven fare computation with regional overrides.
//!
//! ## Features
//!
//! - **Flat route fares**: ferry and airport express rides priced per route
//! - **Zone tiers**: cash priced per boarding, card priced once per zone span
//! - **Pluggable fallback**: any [`FareAlgorithm`] can serve as the default
//! - **Shared tables**: rule tables are read-only and cheap to clone
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use transit_fares::prelude::*;
//!
//! let ferry = FareAttribute::new("FERRY1 FERRY CASH", "FERRY", Money::from_cents(750));
//! let rule = FareRuleSet::new(Arc::new(ferry)).with_routes(["FERRY1"]);
//!
//! let config = FareConfig {
//!     specialized_feeds: vec![FeedIdentifier::new("metro")],
//!     ..Default::default()
//! };
//! let table = FareRuleTable::from_rules_classified(vec![rule], &config.keywords).unwrap();
//!
//! let rides = vec![Ride::new("FERRY1", "FERRY", "metro").with_endpoints("Z1", "Z1")];
//! let service = SpecializedFareService::new(config, NoDefaultFare);
//!
//! let fare = service
//!     .calculate(CurrencyCode::default(), &rides, &table, &[FareType::CashAdult])
//!     .unwrap();
//! assert_eq!(fare.total(&FareType::CashAdult), Some(Money::from_cents(750)));
//! ```

pub mod config;
pub mod engine;
pub mod identifiers;
pub mod models;
pub mod rules;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::FareConfig;
    pub use crate::engine::{
        BasicFareService, FareAlgorithm, FareContainer, NoDefaultFare, SpecializedFareService,
    };
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::rules::{FareKeywords, FareRuleTable};
}

pub use prelude::*;
