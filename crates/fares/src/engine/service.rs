//! Regional fare service: flat route fares and zone tiers, on top of a
//! generic default algorithm.

use tracing::trace;

use crate::config::FareConfig;
use crate::engine::{
    accumulator::FareAccumulator, container::FareContainer, route::RouteFareResolver,
    traits::FareAlgorithm, zone::ZoneFareResolver,
};
use crate::models::{fare::Fare, ride::Ride, types::FareType};
use crate::rules::table::FareRuleTable;

/// Specialized pricing for the configured feeds, delegating the rest.
///
/// Rides of a specialized feed are priced with flat route fares and zone
/// tiers. The delegate also runs for the generic `regular` fare type and
/// whenever a ride belongs to another feed; its price is added to the
/// specialized one.
#[derive(Clone, Debug)]
pub struct SpecializedFareService<D> {
    config: FareConfig,
    default: D,
}

impl<D: FareAlgorithm> SpecializedFareService<D> {
    pub fn new(config: FareConfig, default: D) -> Self {
        Self { config, default }
    }

    pub fn config(&self) -> &FareConfig {
        &self.config
    }

    fn price_specialized(
        &self,
        fare: &mut Fare,
        fare_type: &FareType,
        rides: &[Ride],
        rules: &FareRuleTable,
    ) -> bool {
        let container = FareContainer::build(rides, rules);

        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&self.config).price(&container, fare_type, &mut acc);
        trace!(total = %acc.total(), "route fares priced");
        ZoneFareResolver.price(&container, fare_type, &mut acc);
        trace!(total = %acc.total(), "zone fares priced");

        acc.commit(fare, fare_type)
    }
}

impl<D: FareAlgorithm> FareAlgorithm for SpecializedFareService<D> {
    fn populate_fare(
        &self,
        fare: &mut Fare,
        fare_type: &FareType,
        rides: &[Ride],
        rules: &FareRuleTable,
    ) -> bool {
        let mut has_price = false;

        if rides.iter().any(|ride| self.config.is_specialized(&ride.feed_id)) {
            has_price = self.price_specialized(fare, fare_type, rides, rules);
        }

        let foreign = rides.iter().any(|ride| !self.config.is_specialized(&ride.feed_id));
        if *fare_type == FareType::Regular || foreign {
            has_price |= self.default.populate_fare(fare, fare_type, rides, rules);
        }

        has_price
    }
}
