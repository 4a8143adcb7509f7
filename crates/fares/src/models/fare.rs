//! Fare results.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

/// Breakdown label of a component: the route it covers and what was charged
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteTag {
    pub route_id: RouteIdentifier,
    pub label: Arc<str>,
}

impl RouteTag {
    pub fn new(route_id: impl Into<RouteIdentifier>, label: impl AsRef<str>) -> Self {
        Self {
            route_id: route_id.into(),
            label: label.as_ref().into(),
        }
    }
}

/// One priced contribution to a fare
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareComponent {
    pub fare_id: FareIdentifier,
    pub price: Money,
    pub route_tags: Vec<RouteTag>,
}

impl FareComponent {
    pub fn new(fare_id: FareIdentifier, price: Money) -> Self {
        Self {
            fare_id,
            price,
            route_tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: RouteTag) -> Self {
        self.route_tags.push(tag);
        self
    }
}

/// Total and breakdown for one fare type
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FareEntry {
    pub total: Money,
    pub components: Vec<FareComponent>,
}

/// Result of a fare computation, built fresh per request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fare {
    currency: CurrencyCode,
    entries: HashMap<FareType, FareEntry>,
}

impl Fare {
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            entries: HashMap::new(),
        }
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Add to the total of a fare type. Totals from several algorithms
    /// accumulate rather than replace each other.
    pub fn add_total(&mut self, fare_type: &FareType, amount: Money) {
        self.entries.entry(fare_type.clone()).or_default().total += amount;
    }

    pub fn add_component(&mut self, fare_type: &FareType, component: FareComponent) {
        self.entries
            .entry(fare_type.clone())
            .or_default()
            .components
            .push(component);
    }

    pub fn total(&self, fare_type: &FareType) -> Option<Money> {
        self.entries.get(fare_type).map(|entry| entry.total)
    }

    pub fn components(&self, fare_type: &FareType) -> &[FareComponent] {
        self.entries
            .get(fare_type)
            .map(|entry| entry.components.as_slice())
            .unwrap_or_default()
    }

    pub fn entry(&self, fare_type: &FareType) -> Option<&FareEntry> {
        self.entries.get(fare_type)
    }

    pub fn fare_types(&self) -> impl Iterator<Item = &FareType> {
        self.entries.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
