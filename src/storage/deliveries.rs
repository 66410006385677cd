use rand::Rng;

use super::cereal::Cereal;

/// Inbound shipment of a single cereal.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: u64,
    pub cereal: Cereal,
    pub amount: f32,
}

/// Rolls a delivery of a random cereal with an amount in `[min, max]`,
/// rounded to one decimal place.
pub fn generate_delivery(id: u64, min: f32, max: f32, rng: &mut impl Rng) -> Delivery {
    let cereal = Cereal::ALL[rng.gen_range(0..Cereal::ALL.len())];
    let amount = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };
    Delivery {
        id,
        cereal,
        amount: ((amount * 10.0).round() / 10.0).clamp(min, max.max(min)),
    }
}
