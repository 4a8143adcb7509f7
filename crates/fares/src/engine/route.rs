//! Flat fares for rides on route-scoped rules (ferry, airport express).

use tracing::debug;

use crate::config::FareConfig;
use crate::engine::{accumulator::FareAccumulator, container::FareContainer, price::select_price};
use crate::models::{
    fare::{FareComponent, RouteTag},
    ride::Ride,
    rules::FareRuleSet,
    types::*,
};

/// Prices every excluded ride of a container with its flat route fare.
#[derive(Clone, Copy, Debug)]
pub struct RouteFareResolver<'c> {
    config: &'c FareConfig,
}

impl<'c> RouteFareResolver<'c> {
    pub fn new(config: &'c FareConfig) -> Self {
        Self { config }
    }

    pub fn price(&self, container: &FareContainer<'_>, fare_type: &FareType, acc: &mut FareAccumulator) {
        let Some(payment) = fare_type.payment() else {
            debug!(fare_type = %fare_type, "fare type has no payment method, skipping flat fares");
            return;
        };

        for ride in container.excluded_rides() {
            if let Some(component) = self.price_ride(container, ride, payment, fare_type) {
                acc.add(component);
            }
        }
    }

    fn price_ride(
        &self,
        container: &FareContainer<'_>,
        ride: &Ride,
        payment: PaymentMethod,
        fare_type: &FareType,
    ) -> Option<FareComponent> {
        let Some(category) = self.category(container, ride) else {
            debug!(route = %ride.route_id, "no flat fare category for route");
            return None;
        };

        let Some(rule) = best_rule(container, ride, payment, category) else {
            debug!(
                route = %ride.route_id,
                category = %category.label(),
                ?payment,
                "no flat fare rule"
            );
            return None;
        };

        let price = select_price(&rule.fare, fare_type);
        Some(
            FareComponent::new(rule.fare_id().clone(), price)
                .with_tag(RouteTag::new(ride.route_id.clone(), category.label())),
        )
    }

    /// Flat fare category of a ride, from the rules restricting its route.
    ///
    /// Ferry takes precedence over express. An express ride is in the north
    /// sub-area when any ride of the itinerary touches a north zone.
    pub fn category(&self, container: &FareContainer<'_>, ride: &Ride) -> Option<RuleCategory> {
        let mut express = false;
        for rule in container.route_rules_for(&ride.route_id) {
            match rule.tag.category {
                Some(RuleCategory::Ferry) => return Some(RuleCategory::Ferry),
                Some(RuleCategory::Express(_)) => express = true,
                _ => {}
            }
        }

        express.then(|| {
            if container.touches_any(&self.config.north_zones) {
                RuleCategory::Express(ExpressArea::North)
            } else {
                RuleCategory::Express(ExpressArea::City)
            }
        })
    }
}

/// First rule restricting the ride's route with the wanted payment and category.
fn best_rule<'a>(
    container: &FareContainer<'a>,
    ride: &Ride,
    payment: PaymentMethod,
    category: RuleCategory,
) -> Option<&'a FareRuleSet> {
    container
        .route_rules_for(&ride.route_id)
        .find(|rule| rule.tag.matches(payment, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::*;
    use crate::models::rules::{FareAttribute, PriceTiers, TierPrices};
    use crate::rules::{keywords::FareKeywords, table::FareRuleTable};
    use std::sync::Arc;

    fn flat_rule(id: &str, route: &str, base: i64, cash_adult: i64) -> FareRuleSet {
        let fare = FareAttribute::new(id, "METRO", Money::from_cents(base)).with_tiers(PriceTiers {
            cash: TierPrices::from_raw(Money::from_cents(cash_adult), Money::ZERO, Money::ZERO),
            card: TierPrices::default(),
        });
        FareRuleSet::new(Arc::new(fare))
            .with_key(RuleKey::new(id).with_route(route))
            .with_routes([route])
    }

    fn table(rules: Vec<FareRuleSet>) -> FareRuleTable {
        FareRuleTable::from_rules_classified(rules, &FareKeywords::default()).unwrap()
    }

    fn config() -> FareConfig {
        FareConfig {
            north_zones: vec![ZoneIdentifier::new("N1")],
            ..Default::default()
        }
    }

    #[test]
    fn test_ferry_cash() {
        let table = table(vec![
            flat_rule("FERRY1 FERRY CASH", "FERRY1", 800, 750),
            flat_rule("FERRY1 FERRY CARD", "FERRY1", 600, 0),
        ]);
        let rides = vec![Ride::new("FERRY1", "METRO", "metro").with_endpoints("Z1", "Z1")];
        let container = FareContainer::build(&rides, &table);
        let config = config();

        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::CashAdult, &mut acc);

        assert_eq!(acc.total(), Money::from_cents(750));
        assert_eq!(acc.components().len(), 1);
        assert_eq!(acc.components()[0].fare_id.as_str(), "FERRY1 FERRY CASH");
        assert_eq!(acc.components()[0].route_tags, vec![RouteTag::new("FERRY1", "FERRY")]);

        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::CardAdult, &mut acc);

        assert_eq!(acc.total(), Money::from_cents(600));
        assert_eq!(acc.components()[0].fare_id.as_str(), "FERRY1 FERRY CARD");
    }

    #[test]
    fn test_express_area_split() {
        let table = table(vec![
            flat_rule("EXP AIRPORT NORTH CASH", "EXP", 1200, 0),
            flat_rule("EXP AIRPORT CITY CASH", "EXP", 900, 0),
        ]);
        let config = config();

        let city = vec![Ride::new("EXP", "METRO", "metro").with_endpoints("C1", "C2")];
        let container = FareContainer::build(&city, &table);
        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::Regular, &mut acc);
        assert_eq!(acc.total(), Money::from_cents(900));
        assert_eq!(&*acc.components()[0].route_tags[0].label, "EXPRESS CITY");

        // A connecting ride in the north zone moves the express into the north area
        let north = vec![
            Ride::new("EXP", "METRO", "metro").with_endpoints("C1", "C2"),
            Ride::new("BUS9", "METRO", "metro").with_zones(["N1"]),
        ];
        let container = FareContainer::build(&north, &table);
        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::Regular, &mut acc);
        assert_eq!(acc.total(), Money::from_cents(1200));
        assert_eq!(&*acc.components()[0].route_tags[0].label, "EXPRESS NORTH");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = table(vec![
            flat_rule("FERRY1 FERRY CASH A", "FERRY1", 500, 0),
            flat_rule("FERRY1 FERRY CASH B", "FERRY1", 900, 0),
        ]);
        let rides = vec![Ride::new("ferry1", "METRO", "metro")];
        let container = FareContainer::build(&rides, &table);
        let config = config();

        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::Regular, &mut acc);

        assert_eq!(acc.components().len(), 1);
        assert_eq!(acc.components()[0].fare_id.as_str(), "FERRY1 FERRY CASH A");
    }

    #[test]
    fn test_missing_rule_prices_nothing() {
        // Only a cash rule exists, card pricing finds nothing
        let table = table(vec![flat_rule("FERRY1 FERRY CASH", "FERRY1", 800, 0)]);
        let rides = vec![Ride::new("FERRY1", "METRO", "metro")];
        let container = FareContainer::build(&rides, &table);
        let config = config();

        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::CardChild, &mut acc);
        assert!(acc.components().is_empty());

        let mut acc = FareAccumulator::new();
        RouteFareResolver::new(&config).price(&container, &FareType::Other("tram".into()), &mut acc);
        assert_eq!(acc.total(), Money::ZERO);
    }

    #[test]
    fn test_uncategorised_route_rule() {
        let table = table(vec![flat_rule("TRAM FLAT CASH", "TRAM1", 300, 0)]);
        let rides = vec![Ride::new("TRAM1", "METRO", "metro")];
        let container = FareContainer::build(&rides, &table);
        let config = config();

        assert_eq!(container.excluded_rides().len(), 1);
        assert_eq!(RouteFareResolver::new(&config).category(&container, &rides[0]), None);
    }
}
