use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use transit_fares::prelude::*;

/// Rule table file: fare attributes and the rules applying them
#[derive(Debug, Deserialize)]
pub struct RuleFile {
    pub fares: Vec<RawFare>,
    #[serde(default)]
    pub rules: Vec<RawRule>,
}

/// Price tiers as found in source data, zero meaning "not configured"
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTiers {
    pub adult: i64,
    pub child: i64,
    pub tertiary: i64,
}

impl RawTiers {
    fn to_tiers(&self) -> TierPrices {
        TierPrices::from_raw(
            Money::from_cents(self.adult),
            Money::from_cents(self.child),
            Money::from_cents(self.tertiary),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct RawFare {
    pub id: FareIdentifier,
    pub agency: AgencyIdentifier,
    /// Base price in minor currency units
    pub price: i64,
    #[serde(default)]
    pub cash: RawTiers,
    #[serde(default)]
    pub card: RawTiers,
}

#[derive(Debug, Deserialize)]
pub struct RawRule {
    pub fare_id: FareIdentifier,
    #[serde(default)]
    pub routes: Vec<RouteIdentifier>,
    #[serde(default)]
    pub route_short_names: Vec<String>,
    #[serde(default)]
    pub origins: Vec<ZoneIdentifier>,
    #[serde(default)]
    pub destinations: Vec<ZoneIdentifier>,
    #[serde(default)]
    pub contains: Vec<ZoneIdentifier>,
    #[serde(default)]
    pub payment: Option<PaymentMethod>,
    #[serde(default)]
    pub category: Option<RuleCategory>,
}

impl RawRule {
    fn key(&self) -> RuleKey {
        RuleKey {
            fare_id: self.fare_id.clone(),
            route_id: self.routes.first().cloned(),
            origin: self.origins.first().cloned(),
            destination: self.destinations.first().cloned(),
        }
    }

    fn into_rule(self, fare: Arc<FareAttribute>) -> FareRuleSet {
        let key = self.key();
        let mut rule = FareRuleSet::new(fare).with_key(key).with_tag(RuleTag {
            payment: self.payment,
            category: self.category,
        });
        rule.routes = self.routes;
        rule.route_short_names = self.route_short_names.into_iter().map(Into::into).collect();
        rule.origins = self.origins;
        rule.destinations = self.destinations;
        rule.contains = self.contains;
        rule
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn read_config(path: Option<&Path>) -> Result<FareConfig> {
    match path {
        Some(path) => read_json(path),
        None => Ok(FareConfig::default()),
    }
}

pub fn read_rides(path: &Path) -> Result<Vec<Ride>> {
    read_json(path)
}

/// Load the rule table, tagging untagged rules with `keywords`.
///
/// Every fare without an explicit rule gets a zone-scoped rule of its own.
pub fn read_rule_table(path: &Path, keywords: &FareKeywords) -> Result<FareRuleTable> {
    let file: RuleFile = read_json(path)?;

    let fares: HashMap<FareIdentifier, Arc<FareAttribute>> = file
        .fares
        .iter()
        .map(|raw| {
            let fare = FareAttribute::new(raw.id.clone(), raw.agency.clone(), Money::from_cents(raw.price))
                .with_tiers(PriceTiers {
                    cash: raw.cash.to_tiers(),
                    card: raw.card.to_tiers(),
                });
            (raw.id.clone(), Arc::new(fare))
        })
        .collect();

    let mut rules = Vec::with_capacity(file.rules.len());
    let mut used = std::collections::HashSet::new();
    for raw in file.rules {
        let fare = fares
            .get(&raw.fare_id)
            .cloned()
            .ok_or_else(|| FareError::FareNotFound(raw.fare_id.clone()))?;
        used.insert(raw.fare_id.clone());
        rules.push(raw.into_rule(fare));
    }

    for raw in &file.fares {
        if !used.contains(&raw.id) {
            rules.push(FareRuleSet::new(fares[&raw.id].clone()));
        }
    }

    log::debug!("Loaded {} fares, {} rules", fares.len(), rules.len());

    let table = FareRuleTable::from_rules_classified(rules, keywords)
        .with_context(|| format!("Invalid rule table {}", path.display()))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_rule_parsing() {
        let file: RuleFile = serde_json::from_str(
            r#"{
                "fares": [
                    {"id": "FERRY1 FERRY CASH", "agency": "METRO", "price": 800,
                     "cash": {"adult": 750}},
                    {"id": "METRO 2 ZONE CARD", "agency": "METRO", "price": 300}
                ],
                "rules": [
                    {"fare_id": "FERRY1 FERRY CASH", "routes": ["FERRY1"]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(file.fares.len(), 2);
        assert_eq!(file.fares[0].cash.adult, 750);
        assert_eq!(file.fares[0].cash.child, 0);
        assert_eq!(file.rules[0].key(), RuleKey::new("FERRY1 FERRY CASH").with_route("FERRY1"));
        assert_eq!(file.fares[1].cash.to_tiers(), TierPrices::default());
    }

    #[test]
    fn test_explicit_category() {
        let raw: RawRule = serde_json::from_str(
            r#"{"fare_id": "X", "payment": "card", "category": {"zones": 3}}"#,
        )
        .unwrap();

        assert_eq!(raw.payment, Some(PaymentMethod::Card));
        assert_eq!(raw.category, Some(RuleCategory::Zones(3)));
    }
}
