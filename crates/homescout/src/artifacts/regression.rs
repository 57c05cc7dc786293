use serde::{Deserialize, Serialize};

/// The five numeric inputs the price regression was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseFeatures {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub car_spaces: f64,
    pub floor_area_sqm: f64,
    pub land_size_sqm: f64,
}

/// A fitted linear price regression restored from an offline training run.
///
/// Coefficients are named rather than positional so the artifact stays
/// readable and the feature order cannot silently drift from the training
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceModel {
    pub intercept: f64,
    pub coefficients: HouseFeatures,
}

impl PriceModel {
    /// Point estimate for the current price of a house with these features.
    pub fn predict(&self, features: &HouseFeatures) -> f64 {
        self.intercept
            + self.coefficients.bedrooms * features.bedrooms
            + self.coefficients.bathrooms * features.bathrooms
            + self.coefficients.car_spaces * features.car_spaces
            + self.coefficients.floor_area_sqm * features.floor_area_sqm
            + self.coefficients.land_size_sqm * features.land_size_sqm
    }
}
