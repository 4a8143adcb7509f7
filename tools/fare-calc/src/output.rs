use serde_json::{json, Value};

use transit_fares::prelude::*;

/// Render the priced fare types of `fare` in the requested order
pub fn fare_to_json(fare: &Fare, fare_types: &[FareType]) -> Value {
    let fares: Vec<Value> = fare_types
        .iter()
        .filter_map(|fare_type| fare.entry(fare_type).map(|entry| (fare_type, entry)))
        .map(|(fare_type, entry)| {
            json!({
                "fare_type": fare_type.to_string(),
                "total": entry.total.to_string(),
                "total_cents": entry.total.cents(),
                "components": entry.components,
            })
        })
        .collect();

    json!({
        "currency": fare.currency(),
        "fares": fares,
    })
}
