//! Read-only query operations over the loaded artifact store.

pub mod filter;
pub mod predict;
pub mod recommend;

pub use filter::{filter_listings, ListingCriteria, CATEGORY_ALL, FILTER_RESULT_CAP};
pub use predict::{project_price, PriceProjection, DEFAULT_GROWTH_RATE};
pub use recommend::{recommend, RankedListing, DEFAULT_TOP_N};
