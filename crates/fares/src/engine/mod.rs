//! Fare computation.

pub mod accumulator;
pub mod container;
pub mod default;
pub mod price;
pub mod route;
pub mod service;
pub mod traits;
pub mod zone;

pub use accumulator::FareAccumulator;
pub use container::FareContainer;
pub use default::{BasicFareService, NoDefaultFare};
pub use price::select_price;
pub use route::RouteFareResolver;
pub use service::SpecializedFareService;
pub use traits::FareAlgorithm;
pub use zone::ZoneFareResolver;
