//! Type-safe identifiers for fare entities.
//!
//! All identifiers use Arc<str> for cheap cloning, so rides and rule tables
//! can be shared across worker threads without copying strings.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// ASCII case-insensitive comparison, used when matching rules
            /// against ride data coming from a different source.
            pub fn eq_ignore_case(&self, other: &Self) -> bool {
                self.0.eq_ignore_ascii_case(&other.0)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::new(s))
            }
        }
    };
}

impl_identifier!(RouteIdentifier);
impl_identifier!(ZoneIdentifier);
impl_identifier!(FareIdentifier);
impl_identifier!(AgencyIdentifier);
impl_identifier!(FeedIdentifier);
impl_identifier!(CurrencyCode);

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Synthetic key of one rule-table entry.
///
/// A single source fare id usually expands into several rules (one per
/// route or origin/destination pair), so the fare id alone is not unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub fare_id: FareIdentifier,
    pub route_id: Option<RouteIdentifier>,
    pub origin: Option<ZoneIdentifier>,
    pub destination: Option<ZoneIdentifier>,
}

impl RuleKey {
    pub fn new(fare_id: impl Into<FareIdentifier>) -> Self {
        Self {
            fare_id: fare_id.into(),
            route_id: None,
            origin: None,
            destination: None,
        }
    }

    pub fn with_route(mut self, route_id: impl Into<RouteIdentifier>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    pub fn with_origin_destination(
        mut self,
        origin: impl Into<ZoneIdentifier>,
        destination: impl Into<ZoneIdentifier>,
    ) -> Self {
        self.origin = Some(origin.into());
        self.destination = Some(destination.into());
        self
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part<T: fmt::Display>(p: &Option<T>) -> String {
            p.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        write!(
            f,
            "{}|{}|{}|{}",
            self.fare_id,
            part(&self.route_id),
            part(&self.origin),
            part(&self.destination)
        )
    }
}
