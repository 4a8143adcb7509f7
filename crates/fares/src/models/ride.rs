//! A single ride (leg) of an itinerary.

use std::collections::HashSet;

use crate::identifiers::*;

/// One directed leg of an itinerary on a single route.
///
/// Rides are produced by the routing search and are read-only while a fare
/// is computed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ride {
    pub route_id: RouteIdentifier,
    pub agency_id: AgencyIdentifier,
    pub feed_id: FeedIdentifier,
    pub start_zone: Option<ZoneIdentifier>,
    pub end_zone: Option<ZoneIdentifier>,
    /// Zones traversed between boarding and alighting (may be empty)
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<ZoneIdentifier>,
}

impl Ride {
    pub fn new(
        route_id: impl Into<RouteIdentifier>,
        agency_id: impl Into<AgencyIdentifier>,
        feed_id: impl Into<FeedIdentifier>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            agency_id: agency_id.into(),
            feed_id: feed_id.into(),
            start_zone: None,
            end_zone: None,
            zones: Vec::new(),
        }
    }

    pub fn with_endpoints(
        mut self,
        start: impl Into<ZoneIdentifier>,
        end: impl Into<ZoneIdentifier>,
    ) -> Self {
        self.start_zone = Some(start.into());
        self.end_zone = Some(end.into());
        self
    }

    pub fn with_zones<I, Z>(mut self, zones: I) -> Self
    where
        I: IntoIterator<Item = Z>,
        Z: Into<ZoneIdentifier>,
    {
        self.zones = zones.into_iter().map(Into::into).collect();
        self
    }

    /// Every zone this ride touches: traversed zones plus start and end.
    /// Blank entries are skipped.
    pub fn zone_iter(&self) -> impl Iterator<Item = &ZoneIdentifier> {
        self.zones
            .iter()
            .chain(self.start_zone.iter())
            .chain(self.end_zone.iter())
            .filter(|zone| !zone.is_empty())
    }

    /// Distinct zones touched by this ride
    pub fn touched_zones(&self) -> HashSet<ZoneIdentifier> {
        self.zone_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touched_zones_dedup() {
        let ride = Ride::new("BUS1", "BUS", "city")
            .with_endpoints("Z1", "Z2")
            .with_zones(["Z1", "Z2", "Z3", ""]);

        let zones = ride.touched_zones();
        assert_eq!(zones.len(), 3);
        assert!(zones.contains(&ZoneIdentifier::new("Z3")));
        assert!(!zones.contains(&ZoneIdentifier::new("")));
    }

    #[test]
    fn test_ride_without_zones() {
        let ride = Ride::new("BUS1", "BUS", "city");
        assert!(ride.touched_zones().is_empty());
    }
}
