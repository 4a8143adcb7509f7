//! Price tier selection for a passenger category.

use tracing::debug;

use crate::models::{rules::FareAttribute, types::*};

/// Price of `fare` for `fare_type`.
///
/// Unset tiers fall back to the base price. Fare types without a payment
/// method or passenger category are also charged the base price.
pub fn select_price(fare: &FareAttribute, fare_type: &FareType) -> Money {
    match (fare_type.payment(), fare_type.passenger()) {
        (Some(payment), Some(passenger)) => fare
            .tiers
            .get(payment)
            .get(passenger)
            .unwrap_or(fare.base_price),
        _ => {
            debug!(
                fare_id = %fare.fare_id,
                fare_type = %fare_type,
                "no price tier for fare type, using base price"
            );
            fare.base_price
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rules::{PriceTiers, TierPrices};

    fn fare() -> FareAttribute {
        FareAttribute::new("F", "A", Money::from_cents(400)).with_tiers(PriceTiers {
            cash: TierPrices::from_raw(Money::ZERO, Money::from_cents(200), Money::from_cents(250)),
            card: TierPrices::from_raw(Money::from_cents(350), Money::ZERO, Money::from_cents(150)),
        })
    }

    #[test]
    fn test_zero_tier_falls_back_to_base() {
        assert_eq!(select_price(&fare(), &FareType::CashAdult), Money::from_cents(400));
        assert_eq!(select_price(&fare(), &FareType::Regular), Money::from_cents(400));
        assert_eq!(select_price(&fare(), &FareType::CardChild), Money::from_cents(400));
    }

    #[test]
    fn test_tier_dispatch() {
        let fare = fare();

        assert_eq!(select_price(&fare, &FareType::Child), Money::from_cents(200));
        assert_eq!(select_price(&fare, &FareType::Youth), Money::from_cents(200));
        assert_eq!(select_price(&fare, &FareType::CashChild), Money::from_cents(200));
        assert_eq!(select_price(&fare, &FareType::Senior), Money::from_cents(250));
        assert_eq!(select_price(&fare, &FareType::Special), Money::from_cents(250));
        assert_eq!(select_price(&fare, &FareType::CardAdult), Money::from_cents(350));
        assert_eq!(select_price(&fare, &FareType::CardTertiary), Money::from_cents(150));
    }

    #[test]
    fn test_unknown_fare_type_uses_base() {
        let fare = fare();
        assert_eq!(
            select_price(&fare, &FareType::Other("tram".into())),
            Money::from_cents(400)
        );
    }
}
