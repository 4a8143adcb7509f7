//! Distance-tiered fares for zoned rides.
//!
//! Cash is paid on every boarding, so each zoned ride is priced on its own
//! by the number of zones it touches. A card fare is a stored-value session
//! priced once for the distinct zones spanned by all zoned rides together.

use tracing::{debug, warn};

use crate::engine::{accumulator::FareAccumulator, container::FareContainer, price::select_price};
use crate::identifiers::AgencyIdentifier;
use crate::models::{
    fare::{FareComponent, RouteTag},
    rules::FareRuleSet,
    types::*,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct ZoneFareResolver;

impl ZoneFareResolver {
    pub fn price(&self, container: &FareContainer<'_>, fare_type: &FareType, acc: &mut FareAccumulator) {
        if container.zoned_rides().is_empty() || container.zoned_zones().is_empty() {
            return;
        }

        match fare_type.payment() {
            Some(PaymentMethod::Cash) => self.price_per_ride(container, fare_type, acc),
            Some(PaymentMethod::Card) => self.price_journey(container, fare_type, acc),
            None => debug!(fare_type = %fare_type, "fare type has no payment method, skipping zone fares"),
        }
    }

    fn price_per_ride(&self, container: &FareContainer<'_>, fare_type: &FareType, acc: &mut FareAccumulator) {
        for ride in container.zoned_rides() {
            let zones = ride.touched_zones().len() as u32;
            if zones == 0 {
                debug!(route = %ride.route_id, "zoned ride touches no zone");
                continue;
            }

            let category = RuleCategory::Zones(zones);
            let Some(rule) = zone_rule(container, &ride.agency_id, PaymentMethod::Cash, category) else {
                debug!(route = %ride.route_id, zones, "no cash zone rule");
                continue;
            };

            let price = select_price(&rule.fare, fare_type);
            acc.add(
                FareComponent::new(rule.fare_id().clone(), price)
                    .with_tag(RouteTag::new(ride.route_id.clone(), category.label())),
            );
        }
    }

    fn price_journey(&self, container: &FareContainer<'_>, fare_type: &FareType, acc: &mut FareAccumulator) {
        let rides = container.zoned_rides();
        let Some(anchor) = rides.first() else {
            return;
        };

        // The whole zoned journey is billed under the first ride's provider
        if let Some(other) = rides
            .iter()
            .find(|ride| !ride.agency_id.eq_ignore_case(&anchor.agency_id))
        {
            warn!(
                anchor = %anchor.agency_id,
                other = %other.agency_id,
                "zoned journey spans several agencies, pricing card fare under the first"
            );
        }

        let category = RuleCategory::Zones(container.zoned_zones().len() as u32);
        let Some(rule) = zone_rule(container, &anchor.agency_id, PaymentMethod::Card, category) else {
            debug!(agency = %anchor.agency_id, category = %category.label(), "no card zone rule");
            return;
        };

        let label = category.label();
        let mut component = FareComponent::new(rule.fare_id().clone(), select_price(&rule.fare, fare_type));
        for ride in rides {
            component = component.with_tag(RouteTag::new(ride.route_id.clone(), &label));
        }
        acc.add(component);
    }
}

/// First zone-scoped rule of the agency with the wanted payment and tier.
fn zone_rule<'a>(
    container: &FareContainer<'a>,
    agency_id: &AgencyIdentifier,
    payment: PaymentMethod,
    category: RuleCategory,
) -> Option<&'a FareRuleSet> {
    container
        .zone_scoped()
        .iter()
        .copied()
        .find(|rule| rule.agency_id().eq_ignore_case(agency_id) && rule.tag.matches(payment, category))
}
