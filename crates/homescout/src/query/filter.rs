use crate::artifacts::Listing;

/// Hard cap on the number of rows a filter query can return.
pub const FILTER_RESULT_CAP: usize = 10;

/// Sentinel category meaning "no category constraint".
pub const CATEGORY_ALL: &str = "all";

/// Structured listing constraints. Every field is optional; a field that is
/// absent, zero, or the empty string places no constraint, and the category
/// sentinel "all" is treated the same as no category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingCriteria {
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
}

impl ListingCriteria {
    fn bedrooms_constraint(&self) -> Option<u32> {
        self.bedrooms.filter(|&count| count != 0)
    }

    fn bathrooms_constraint(&self) -> Option<u32> {
        self.bathrooms.filter(|&count| count != 0)
    }

    fn min_price_constraint(&self) -> Option<f64> {
        self.min_price.filter(|&price| price != 0.0)
    }

    fn max_price_constraint(&self) -> Option<f64> {
        self.max_price.filter(|&price| price != 0.0)
    }

    fn category_constraint(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty() && *category != CATEGORY_ALL)
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(bedrooms) = self.bedrooms_constraint() {
            if listing.bedrooms != bedrooms {
                return false;
            }
        }
        if let Some(bathrooms) = self.bathrooms_constraint() {
            if listing.bathrooms != bathrooms {
                return false;
            }
        }
        if let Some(min_price) = self.min_price_constraint() {
            if listing.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price_constraint() {
            if listing.price > max_price {
                return false;
            }
        }
        if let Some(category) = self.category_constraint() {
            if listing.category != category {
                return false;
            }
        }
        true
    }
}

/// First `FILTER_RESULT_CAP` listings satisfying every supplied criterion,
/// in original dataset order. Rows past the cap are unreachable; there is
/// no pagination.
pub fn filter_listings<'a>(
    listings: &'a [Listing],
    criteria: &ListingCriteria,
) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .take(FILTER_RESULT_CAP)
        .collect()
}
