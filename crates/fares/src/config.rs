//! Region settings for the specialized fare path.

use crate::identifiers::*;
use crate::rules::keywords::FareKeywords;

/// Settings of the specialized fare service
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FareConfig {
    /// Feeds whose rides are priced by the specialized path
    pub specialized_feeds: Vec<FeedIdentifier>,

    /// Outer zones that put an express ride into the north sub-area
    pub north_zones: Vec<ZoneIdentifier>,

    /// Keywords used to tag rules when the table is loaded
    pub keywords: FareKeywords,

    pub currency: CurrencyCode,
}

impl FareConfig {
    pub fn is_specialized(&self, feed_id: &FeedIdentifier) -> bool {
        self.specialized_feeds.iter().any(|feed| feed.eq_ignore_case(feed_id))
    }
}
