use homescout::artifacts::{HouseFeatures, Listing, ModelContext, PriceModel, TfidfVectorizer};
use homescout::query::{
    filter_listings, project_price, recommend, ListingCriteria, DEFAULT_GROWTH_RATE,
    FILTER_RESULT_CAP,
};
use std::collections::HashMap;

fn fixture_context() -> ModelContext {
    let vocabulary = HashMap::from([
        ("beach".to_string(), 0),
        ("garden".to_string(), 1),
        ("pool".to_string(), 2),
        ("river".to_string(), 3),
        ("views".to_string(), 4),
    ]);
    let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.2, 1.5, 1.8, 2.0, 1.1])
        .expect("fixture vectorizer is consistent");

    let rows = [
        ("Sunny cottage with a lush garden", "Fremantle", 650_000.0, "house"),
        ("Apartment with river views", "Perth", 540_000.0, "apartment"),
        ("Beach front home with pool", "Scarborough", 1_150_000.0, "house"),
        ("Compact beach shack", "Rockingham", 420_000.0, "house"),
        ("Townhouse with plunge pool and garden", "Subiaco", 830_000.0, "townhouse"),
        ("Penthouse with sweeping river views", "East Perth", 1_600_000.0, "apartment"),
    ];
    let listings: Vec<Listing> = rows
        .iter()
        .enumerate()
        .map(|(i, (description, location, price, category))| Listing {
            description: description.to_string(),
            location: location.to_string(),
            bedrooms: 2 + (i as u32 % 3),
            bathrooms: 1 + (i as u32 % 2),
            car_spaces: i as u32 % 3,
            floor_area_sqm: 80.0 + 20.0 * i as f64,
            land_size_sqm: 250.0 + 50.0 * i as f64,
            price: *price,
            category: category.to_string(),
        })
        .collect();

    let matrix = listings
        .iter()
        .map(|listing| vectorizer.transform(&listing.description))
        .collect();

    let price_model = PriceModel {
        intercept: 80_000.0,
        coefficients: HouseFeatures {
            bedrooms: 45_000.0,
            bathrooms: 25_000.0,
            car_spaces: 8_000.0,
            floor_area_sqm: 1_800.0,
            land_size_sqm: 250.0,
        },
    };

    ModelContext::from_parts(vectorizer, matrix, price_model, listings)
        .expect("fixture context is consistent")
}

#[test]
fn recommend_returns_exactly_top_n_for_every_valid_count() {
    let context = fixture_context();
    let dataset_size = context.listings().len();
    for top_n in 1..=dataset_size {
        let ranked = recommend(&context, "beach house with pool", top_n);
        assert_eq!(ranked.len(), top_n, "top_n = {top_n}");
        assert!(
            ranked.windows(2).all(|pair| pair[0].score >= pair[1].score),
            "scores must be non-increasing for top_n = {top_n}"
        );
    }
}

#[test]
fn recommend_caps_at_dataset_size() {
    let context = fixture_context();
    let ranked = recommend(&context, "garden", context.listings().len() + 40);
    assert_eq!(ranked.len(), context.listings().len());
}

#[test]
fn recommend_surfaces_the_closest_description_first() {
    let context = fixture_context();
    let ranked = recommend(&context, "beach front pool", 3);
    assert_eq!(ranked[0].listing.description, "Beach front home with pool");
    assert!(ranked[0].score > 0.0);
}

#[test]
fn filtered_rows_satisfy_every_criterion() {
    let context = fixture_context();
    let criteria = ListingCriteria {
        min_price: Some(500_000.0),
        max_price: Some(1_200_000.0),
        category: Some("house".to_string()),
        ..Default::default()
    };
    let results = filter_listings(context.listings(), &criteria);
    assert!(!results.is_empty());
    assert!(results.len() <= FILTER_RESULT_CAP);
    for listing in results {
        assert!(listing.price >= 500_000.0);
        assert!(listing.price <= 1_200_000.0);
        assert_eq!(listing.category, "house");
    }
}

#[test]
fn category_all_matches_omitting_the_criterion() {
    let context = fixture_context();
    let sentinel = ListingCriteria {
        bedrooms: Some(3),
        category: Some("all".to_string()),
        ..Default::default()
    };
    let omitted = ListingCriteria {
        bedrooms: Some(3),
        ..Default::default()
    };
    assert_eq!(
        filter_listings(context.listings(), &sentinel),
        filter_listings(context.listings(), &omitted)
    );
}

#[test]
fn every_reported_category_appears_in_the_dataset() {
    let context = fixture_context();
    let categories = context.categories();
    assert_eq!(categories, vec!["house", "apartment", "townhouse"]);
    for category in &categories {
        assert!(context
            .listings()
            .iter()
            .any(|listing| listing.category == *category));
    }
}

#[test]
fn projection_uses_the_default_growth_rate() {
    let context = fixture_context();
    let features = HouseFeatures {
        bedrooms: 3.0,
        bathrooms: 2.0,
        car_spaces: 1.0,
        floor_area_sqm: 140.0,
        land_size_sqm: 480.0,
    };
    let projection = project_price(context.price_model(), &features, 10, DEFAULT_GROWTH_RATE);
    assert!(projection.current_price > 0.0);
    let expected = projection.current_price * 1.05_f64.powi(10);
    assert!((projection.future_price - expected).abs() < 1e-6);
    assert!(projection.appreciation > 0.0);
}
