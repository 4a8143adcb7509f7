//! Running total of the specialized pricing path.

use crate::models::{
    fare::{Fare, FareComponent},
    types::{FareType, Money},
};

/// Components priced so far, committed to a [`Fare`] at the end
#[derive(Clone, Debug, Default)]
pub struct FareAccumulator {
    total: Money,
    components: Vec<FareComponent>,
}

impl FareAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, component: FareComponent) {
        self.total += component.price;
        self.components.push(component);
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn components(&self) -> &[FareComponent] {
        &self.components
    }

    /// Write the accumulated price into `fare` if it is positive.
    ///
    /// Returns whether anything was committed.
    pub fn commit(self, fare: &mut Fare, fare_type: &FareType) -> bool {
        if self.total <= Money::ZERO {
            return false;
        }

        fare.add_total(fare_type, self.total);
        for component in self.components {
            fare.add_component(fare_type, component);
        }
        true
    }
}
