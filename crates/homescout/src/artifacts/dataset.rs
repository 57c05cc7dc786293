use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

/// One row of the housing dataset. Loaded once at startup and immutable for
/// the process lifetime; responses clone rows out of the shared table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub description: String,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub car_spaces: u32,
    pub floor_area_sqm: f64,
    pub land_size_sqm: f64,
    pub price: f64,
    pub category: String,
}

pub(crate) fn load_listings<R: Read>(reader: R) -> Result<Vec<Listing>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();
    for record in csv_reader.deserialize::<Listing>() {
        listings.push(record?);
    }
    Ok(listings)
}

/// Distinct category values in first-seen dataset order.
pub fn distinct_categories(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for listing in listings {
        if seen.insert(listing.category.as_str()) {
            categories.push(listing.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
description,location,bedrooms,bathrooms,car_spaces,floor_area_sqm,land_size_sqm,price,category
Sunny cottage with garden,Fremantle,3,1,1,110.0,420.0,650000,house
Modern apartment near the river,Perth,2,2,1,85.5,0.0,540000,apartment
Family home with pool,Joondalup,4,2,2,210.0,600.0,890000,house
";

    #[test]
    fn parses_typed_rows_from_csv() {
        let listings = load_listings(SAMPLE_CSV.as_bytes()).expect("sample parses");
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].bedrooms, 3);
        assert_eq!(listings[1].floor_area_sqm, 85.5);
        assert_eq!(listings[2].category, "house");
    }

    #[test]
    fn rejects_non_numeric_columns() {
        let bad = "\
description,location,bedrooms,bathrooms,car_spaces,floor_area_sqm,land_size_sqm,price,category
Sunny cottage,Fremantle,three,1,1,110.0,420.0,650000,house
";
        assert!(load_listings(bad.as_bytes()).is_err());
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let listings = load_listings(SAMPLE_CSV.as_bytes()).expect("sample parses");
        assert_eq!(distinct_categories(&listings), vec!["house", "apartment"]);
    }
}
