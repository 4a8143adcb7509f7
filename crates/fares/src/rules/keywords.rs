//! Load-time classification of rules from their identifiers.
//!
//! Source feeds encode what a rule prices in the fare id itself
//! (e.g. `"FERRY1 FERRY CASH"`, `"BUS 3 ZONE CARD"`). The keywords are
//! matched once while the table is loaded and the result is stored as a
//! [`RuleTag`]; pricing never looks at the identifier again.

use crate::models::rules::FareRuleSet;
use crate::models::types::*;

/// Keywords recognised in fare identifiers (case-insensitive)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FareKeywords {
    pub ferry: String,
    pub express: String,
    pub north: String,
    pub city: String,
    pub cash: String,
    pub card: String,
    pub zone: String,
}

impl Default for FareKeywords {
    fn default() -> Self {
        Self {
            ferry: "FERRY".into(),
            express: "AIRPORT".into(),
            north: "NORTH".into(),
            city: "CITY".into(),
            cash: "CASH".into(),
            card: "CARD".into(),
            zone: "ZONE".into(),
        }
    }
}

impl FareKeywords {
    pub fn classify(&self, fare_id: &str) -> RuleTag {
        let id = fare_id.to_ascii_uppercase();
        let has = |keyword: &str| !keyword.is_empty() && id.contains(&keyword.to_ascii_uppercase());

        let payment = if has(self.card.as_str()) {
            Some(PaymentMethod::Card)
        } else if has(self.cash.as_str()) {
            Some(PaymentMethod::Cash)
        } else {
            None
        };

        let category = if has(self.ferry.as_str()) {
            Some(RuleCategory::Ferry)
        } else if has(self.express.as_str()) {
            // An express rule without a sub-area keyword prices the city leg
            let area = if has(self.city.as_str()) {
                ExpressArea::City
            } else if has(self.north.as_str()) {
                ExpressArea::North
            } else {
                ExpressArea::City
            };
            Some(RuleCategory::Express(area))
        } else {
            self.zone_count(&id).map(RuleCategory::Zones)
        };

        RuleTag { payment, category }
    }

    /// Zone count written next to the zone keyword: `3 ZONE`, `3-ZONE`,
    /// `3ZONES`, `ZONE 3` or `ZONE3`.
    fn zone_count(&self, id: &str) -> Option<u32> {
        let keyword = self.zone.to_ascii_uppercase();
        if keyword.is_empty() {
            return None;
        }

        let tokens: Vec<&str> = id
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        for (i, token) in tokens.iter().enumerate() {
            let Some(pos) = token.find(keyword.as_str()) else {
                continue;
            };

            let before = &token[..pos];
            let after = token[pos + keyword.len()..].trim_start_matches('S');

            if let Ok(n) = before.parse() {
                return Some(n);
            }
            if let Ok(n) = after.parse() {
                return Some(n);
            }
            if before.is_empty() && after.is_empty() {
                let previous = i.checked_sub(1).and_then(|j| tokens.get(j));
                if let Some(n) = previous.and_then(|t| t.parse().ok()) {
                    return Some(n);
                }
                if let Some(n) = tokens.get(i + 1).and_then(|t| t.parse().ok()) {
                    return Some(n);
                }
            }
        }

        None
    }
}

impl FareRuleSet {
    /// Fill in the tag from the fare id when the source did not provide one.
    pub fn with_inferred_tag(mut self, keywords: &FareKeywords) -> Self {
        let inferred = keywords.classify(self.fare_id().as_str());
        self.tag.payment = self.tag.payment.or(inferred.payment);
        self.tag.category = self.tag.category.or(inferred.category);
        self
    }
}
