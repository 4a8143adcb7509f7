//! Fare attributes (price tiers) and the rules that apply them.

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

/// Optional prices for the three passenger categories of one payment method.
///
/// `None` means the tier is not configured and the base price applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierPrices {
    pub adult: Option<Money>,
    pub child: Option<Money>,
    pub tertiary: Option<Money>,
}

impl TierPrices {
    /// Build from source values where zero marks an unset tier.
    pub fn from_raw(adult: Money, child: Money, tertiary: Money) -> Self {
        Self {
            adult: adult.non_zero(),
            child: child.non_zero(),
            tertiary: tertiary.non_zero(),
        }
    }

    pub fn get(&self, passenger: PassengerCategory) -> Option<Money> {
        match passenger {
            PassengerCategory::Adult => self.adult,
            PassengerCategory::Child => self.child,
            PassengerCategory::Tertiary => self.tertiary,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceTiers {
    pub cash: TierPrices,
    pub card: TierPrices,
}

impl PriceTiers {
    pub fn get(&self, payment: PaymentMethod) -> &TierPrices {
        match payment {
            PaymentMethod::Cash => &self.cash,
            PaymentMethod::Card => &self.card,
        }
    }
}

/// Price tiers of one fare
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FareAttribute {
    pub fare_id: FareIdentifier,
    pub agency_id: AgencyIdentifier,
    pub base_price: Money,
    pub tiers: PriceTiers,
}

impl FareAttribute {
    pub fn new(
        fare_id: impl Into<FareIdentifier>,
        agency_id: impl Into<AgencyIdentifier>,
        base_price: Money,
    ) -> Self {
        Self {
            fare_id: fare_id.into(),
            agency_id: agency_id.into(),
            base_price,
            tiers: PriceTiers::default(),
        }
    }

    pub fn with_tiers(mut self, tiers: PriceTiers) -> Self {
        self.tiers = tiers;
        self
    }
}

/// A priced rule scoped to a provider.
///
/// A non-empty `routes` list makes the rule route-scoped (flat fare);
/// otherwise it is zone-scoped.
#[derive(Clone, Debug)]
pub struct FareRuleSet {
    pub key: RuleKey,
    pub fare: Arc<FareAttribute>,
    pub routes: Vec<RouteIdentifier>,
    pub route_short_names: Vec<Arc<str>>,
    pub origins: Vec<ZoneIdentifier>,
    pub destinations: Vec<ZoneIdentifier>,
    pub contains: Vec<ZoneIdentifier>,
    pub tag: RuleTag,
}

impl FareRuleSet {
    pub fn new(fare: Arc<FareAttribute>) -> Self {
        Self {
            key: RuleKey::new(fare.fare_id.clone()),
            fare,
            routes: Vec::new(),
            route_short_names: Vec::new(),
            origins: Vec::new(),
            destinations: Vec::new(),
            contains: Vec::new(),
            tag: RuleTag::default(),
        }
    }

    pub fn with_key(mut self, key: RuleKey) -> Self {
        self.key = key;
        self
    }

    pub fn with_routes<I, R>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RouteIdentifier>,
    {
        self.routes = routes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tag(mut self, tag: RuleTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn fare_id(&self) -> &FareIdentifier {
        &self.fare.fare_id
    }

    pub fn agency_id(&self) -> &AgencyIdentifier {
        &self.fare.agency_id
    }

    pub fn is_route_scoped(&self) -> bool {
        !self.routes.is_empty()
    }

    pub fn restricts_route(&self, route_id: &RouteIdentifier) -> bool {
        self.routes.iter().any(|r| r.eq_ignore_case(route_id))
    }
}
