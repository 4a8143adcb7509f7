//! Per-itinerary view of a rule table.
//!
//! Splits the rules into route-scoped (flat fare) and zone-scoped
//! (distance tiered) sets, and the rides into excluded rides, covered by a
//! flat per-route fare, and zoned rides, covered by a zone tier.

use std::collections::HashSet;

use tracing::trace;

use crate::identifiers::*;
use crate::models::{ride::Ride, rules::FareRuleSet};
use crate::rules::table::FareRuleTable;

/// Working set for one (itinerary, fare type) computation.
///
/// Every ride lands in exactly one of `excluded_rides` and `zoned_rides`.
#[derive(Debug)]
pub struct FareContainer<'a> {
    rides: &'a [Ride],
    route_scoped: Vec<&'a FareRuleSet>,
    zone_scoped: Vec<&'a FareRuleSet>,
    excluded_route_ids: HashSet<RouteIdentifier>,
    excluded_rides: Vec<&'a Ride>,
    zoned_rides: Vec<&'a Ride>,
    excluded_zones: HashSet<ZoneIdentifier>,
    zoned_zones: HashSet<ZoneIdentifier>,
}

impl<'a> FareContainer<'a> {
    pub fn build(rides: &'a [Ride], rules: &'a FareRuleTable) -> Self {
        let (route_scoped, zone_scoped): (Vec<&FareRuleSet>, Vec<&FareRuleSet>) = rules
            .iter()
            .map(|rule| rule.as_ref())
            .partition(|rule| rule.is_route_scoped());

        let excluded_route_ids: HashSet<RouteIdentifier> = route_scoped
            .iter()
            .flat_map(|rule| rule.routes.iter().cloned())
            .collect();

        // Route matching is case-insensitive, like the resolvers
        let (excluded_rides, zoned_rides): (Vec<&Ride>, Vec<&Ride>) = rides
            .iter()
            .partition(|ride| route_scoped.iter().any(|rule| rule.restricts_route(&ride.route_id)));

        let excluded_zones = collect_zones(&excluded_rides);
        let zoned_zones = collect_zones(&zoned_rides);

        trace!(
            rides = rides.len(),
            route_scoped = route_scoped.len(),
            zone_scoped = zone_scoped.len(),
            excluded = excluded_rides.len(),
            zoned = zoned_rides.len(),
            zoned_zones = zoned_zones.len(),
            "built fare container"
        );

        Self {
            rides,
            route_scoped,
            zone_scoped,
            excluded_route_ids,
            excluded_rides,
            zoned_rides,
            excluded_zones,
            zoned_zones,
        }
    }

    pub fn rides(&self) -> &'a [Ride] {
        self.rides
    }

    pub fn route_scoped(&self) -> &[&'a FareRuleSet] {
        &self.route_scoped
    }

    pub fn zone_scoped(&self) -> &[&'a FareRuleSet] {
        &self.zone_scoped
    }

    pub fn excluded_route_ids(&self) -> &HashSet<RouteIdentifier> {
        &self.excluded_route_ids
    }

    pub fn excluded_rides(&self) -> &[&'a Ride] {
        &self.excluded_rides
    }

    pub fn zoned_rides(&self) -> &[&'a Ride] {
        &self.zoned_rides
    }

    pub fn excluded_zones(&self) -> &HashSet<ZoneIdentifier> {
        &self.excluded_zones
    }

    /// Distinct zones spanned by the zoned part of the itinerary
    pub fn zoned_zones(&self) -> &HashSet<ZoneIdentifier> {
        &self.zoned_zones
    }

    /// Route-scoped rules that restrict the given route, in table order
    pub fn route_rules_for<'s>(
        &'s self,
        route_id: &'s RouteIdentifier,
    ) -> impl Iterator<Item = &'a FareRuleSet> + 's {
        self.route_scoped
            .iter()
            .copied()
            .filter(move |rule| rule.restricts_route(route_id))
    }

    /// Whether any ride of the itinerary touches one of `zones`
    pub fn touches_any(&self, zones: &[ZoneIdentifier]) -> bool {
        self.rides
            .iter()
            .flat_map(Ride::zone_iter)
            .any(|zone| zones.iter().any(|z| z.eq_ignore_case(zone)))
    }
}

fn collect_zones(rides: &[&Ride]) -> HashSet<ZoneIdentifier> {
    rides
        .iter()
        .flat_map(|ride| ride.zone_iter())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{rules::FareAttribute, types::Money};
    use std::sync::Arc;

    fn table() -> FareRuleTable {
        let ferry = Arc::new(FareAttribute::new("FERRY1 FERRY CASH", "FERRY", Money::from_cents(750)));
        let zone = Arc::new(FareAttribute::new("BUS 2 ZONE CASH", "BUS", Money::from_cents(300)));

        FareRuleTable::from_rules(vec![
            FareRuleSet::new(ferry).with_routes(["FERRY1"]),
            FareRuleSet::new(zone),
        ])
        .unwrap()
    }

    #[test]
    fn test_partition_is_disjoint_and_exhaustive() {
        let rides = vec![
            Ride::new("FERRY1", "FERRY", "metro").with_endpoints("Z1", "Z1"),
            Ride::new("BUS1", "BUS", "metro").with_zones(["Z1", "Z2"]),
            Ride::new("ferry1", "FERRY", "metro"),
        ];
        let table = table();
        let container = FareContainer::build(&rides, &table);

        assert_eq!(container.route_scoped().len(), 1);
        assert_eq!(container.zone_scoped().len(), 1);
        assert_eq!(container.excluded_rides().len(), 2);
        assert_eq!(container.zoned_rides().len(), 1);
        assert_eq!(
            container.excluded_rides().len() + container.zoned_rides().len(),
            rides.len()
        );
        for ride in container.excluded_rides() {
            assert!(!container.zoned_rides().contains(ride));
        }
        assert!(container
            .excluded_route_ids()
            .contains(&RouteIdentifier::new("FERRY1")));
    }

    #[test]
    fn test_zoned_zones_union() {
        let rides = vec![
            Ride::new("BUS1", "BUS", "metro").with_zones(["Z1"]),
            Ride::new("BUS2", "BUS", "metro").with_zones(["Z2"]),
        ];
        let table = table();
        let container = FareContainer::build(&rides, &table);

        assert!(container.excluded_rides().is_empty());
        assert_eq!(container.zoned_rides().len(), 2);

        let expected: HashSet<ZoneIdentifier> = ["Z1", "Z2"].into_iter().map(Into::into).collect();
        assert_eq!(container.zoned_zones(), &expected);
    }

    #[test]
    fn test_zoned_zones_include_endpoints_and_skip_blanks() {
        let rides = vec![Ride::new("BUS1", "BUS", "metro")
            .with_endpoints("Z1", "Z3")
            .with_zones(["Z2", "", "Z1"])];
        let table = table();
        let container = FareContainer::build(&rides, &table);

        assert_eq!(container.zoned_zones().len(), 3);
    }

    #[test]
    fn test_empty_table_zones_everything() {
        let rides = vec![
            Ride::new("FERRY1", "FERRY", "metro"),
            Ride::new("BUS1", "BUS", "metro"),
        ];
        let table = FareRuleTable::new();
        let container = FareContainer::build(&rides, &table);

        assert!(container.excluded_rides().is_empty());
        assert!(container.excluded_route_ids().is_empty());
        assert_eq!(container.zoned_rides().len(), 2);
    }

    #[test]
    fn test_touches_any() {
        let rides = vec![
            Ride::new("FERRY1", "FERRY", "metro").with_endpoints("Z1", "Z1"),
            Ride::new("BUS1", "BUS", "metro").with_zones(["N1"]),
        ];
        let table = table();
        let container = FareContainer::build(&rides, &table);

        assert!(container.touches_any(&[ZoneIdentifier::new("n1")]));
        assert!(!container.touches_any(&[ZoneIdentifier::new("N2")]));
    }
}
