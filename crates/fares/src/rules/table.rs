//! Read-only rule table of one feed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::rules::FareRuleSet;
use crate::models::types::*;
use crate::rules::keywords::FareKeywords;

/// Ordered rule table keyed by [`RuleKey`].
///
/// Source order is preserved: when several rules match, the first one
/// wins. This type is cheap to clone since all data is stored in `Arc`s,
/// and it is shared by concurrent computations without locking.
#[derive(Clone, Debug, Default)]
pub struct FareRuleTable {
    rules: Arc<Vec<Arc<FareRuleSet>>>,
    key_map: Arc<HashMap<RuleKey, usize>>,
}

impl FareRuleTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rules in source order.
    ///
    /// Fails if two rules share a key.
    pub fn from_rules(rules: Vec<FareRuleSet>) -> Result<Self> {
        let mut key_map = HashMap::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            if key_map.insert(rule.key.clone(), index).is_some() {
                return Err(FareError::DuplicateRule(rule.key.clone()));
            }
        }

        let rules: Vec<Arc<FareRuleSet>> = rules.into_iter().map(Arc::new).collect();

        Ok(Self {
            rules: Arc::new(rules),
            key_map: Arc::new(key_map),
        })
    }

    /// Build a table, tagging every rule from its identifier first.
    pub fn from_rules_classified(rules: Vec<FareRuleSet>, keywords: &FareKeywords) -> Result<Self> {
        Self::from_rules(
            rules
                .into_iter()
                .map(|rule| rule.with_inferred_tag(keywords))
                .collect(),
        )
    }

    pub fn get(&self, key: &RuleKey) -> Option<&Arc<FareRuleSet>> {
        self.key_map.get(key).map(|&index| &self.rules[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<FareRuleSet>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
