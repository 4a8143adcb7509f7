//! Generic fallback algorithms.

use tracing::debug;

use crate::engine::{price::select_price, traits::FareAlgorithm};
use crate::models::{
    fare::{Fare, FareComponent, RouteTag},
    ride::Ride,
    rules::FareRuleSet,
    types::{FareType, Money},
};
use crate::rules::table::FareRuleTable;

/// Fallback that never prices anything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDefaultFare;

impl FareAlgorithm for NoDefaultFare {
    fn populate_fare(&self, _: &mut Fare, _: &FareType, _: &[Ride], _: &FareRuleTable) -> bool {
        false
    }
}

/// Per-ride fare from the plain rule constraints.
///
/// Each ride is charged the cheapest rule whose agency, route, origin,
/// destination and contained zones admit it. If any ride cannot be priced
/// the itinerary gets no fare at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicFareService;

impl BasicFareService {
    fn cheapest<'a>(
        &self,
        ride: &Ride,
        fare_type: &FareType,
        rules: &'a FareRuleTable,
    ) -> Option<(&'a FareRuleSet, Money)> {
        rules
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| admits(rule, ride))
            .map(|rule| (rule, select_price(&rule.fare, fare_type)))
            .min_by_key(|(_, price)| *price)
    }
}

impl FareAlgorithm for BasicFareService {
    fn populate_fare(
        &self,
        fare: &mut Fare,
        fare_type: &FareType,
        rides: &[Ride],
        rules: &FareRuleTable,
    ) -> bool {
        if rides.is_empty() {
            return false;
        }

        let mut priced = Vec::with_capacity(rides.len());
        for ride in rides {
            match self.cheapest(ride, fare_type, rules) {
                Some(found) => priced.push((ride, found)),
                None => {
                    debug!(route = %ride.route_id, fare_type = %fare_type, "no default rule for ride");
                    return false;
                }
            }
        }

        for (ride, (rule, price)) in priced {
            fare.add_total(fare_type, price);
            fare.add_component(
                fare_type,
                FareComponent::new(rule.fare_id().clone(), price)
                    .with_tag(RouteTag::new(ride.route_id.clone(), rule.fare_id().as_str())),
            );
        }
        true
    }
}

fn admits(rule: &FareRuleSet, ride: &Ride) -> bool {
    if !rule.agency_id().eq_ignore_case(&ride.agency_id) {
        return false;
    }
    if rule.is_route_scoped() && !rule.restricts_route(&ride.route_id) {
        return false;
    }
    if !rule.origins.is_empty() && !ride.start_zone.as_ref().is_some_and(|z| rule.origins.contains(z)) {
        return false;
    }
    if !rule.destinations.is_empty()
        && !ride.end_zone.as_ref().is_some_and(|z| rule.destinations.contains(z))
    {
        return false;
    }
    if !rule.contains.is_empty() {
        let touched = ride.touched_zones();
        if touched.len() != rule.contains.len() || !rule.contains.iter().all(|z| touched.contains(z)) {
            return false;
        }
    }
    true
}
