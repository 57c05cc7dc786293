use crate::artifacts::{HouseFeatures, PriceModel};
use serde::Serialize;

/// Yearly growth assumption applied when the caller does not supply one.
pub const DEFAULT_GROWTH_RATE: f64 = 0.05;

/// A price estimate compounded forward under a yearly growth assumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceProjection {
    pub current_price: f64,
    pub future_price: f64,
    pub years: i32,
    pub growth_rate: f64,
    pub appreciation: f64,
}

/// Estimate the current price from the regression, then compound it forward
/// by `growth_rate` per year. The rate may be zero (flat) or negative
/// (depreciation). A zero current estimate reports 0.0 appreciation rather
/// than dividing by zero.
pub fn project_price(
    model: &PriceModel,
    features: &HouseFeatures,
    years: i32,
    growth_rate: f64,
) -> PriceProjection {
    let current_price = model.predict(features);
    let future_price = current_price * (1.0 + growth_rate).powi(years);
    let appreciation = if current_price == 0.0 {
        0.0
    } else {
        (future_price - current_price) / current_price * 100.0
    };

    PriceProjection {
        current_price,
        future_price,
        years,
        growth_rate,
        appreciation,
    }
}
