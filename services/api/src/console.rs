use clap::Args;
use homescout::artifacts::{HouseFeatures, ModelContext};
use homescout::config::AppConfig;
use homescout::error::AppError;
use homescout::query::{
    filter_listings, project_price, recommend, ListingCriteria, DEFAULT_GROWTH_RATE, DEFAULT_TOP_N,
};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Free-text description of the desired home
    #[arg(long)]
    description: String,
    /// Number of listings to return
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,
    /// Override the configured artifact directory
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct FilterArgs {
    #[arg(long)]
    bedrooms: Option<u32>,
    #[arg(long)]
    bathrooms: Option<u32>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long)]
    category: Option<String>,
    /// Override the configured artifact directory
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[arg(long)]
    bedrooms: f64,
    #[arg(long)]
    bathrooms: f64,
    #[arg(long)]
    car_spaces: f64,
    #[arg(long)]
    floor_area_sqm: f64,
    #[arg(long)]
    land_size_sqm: f64,
    /// Projection horizon in years
    #[arg(long)]
    years: i32,
    /// Yearly compound growth assumption
    #[arg(long, default_value_t = DEFAULT_GROWTH_RATE)]
    growth_rate: f64,
    /// Override the configured artifact directory
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CategoriesArgs {
    /// Override the configured artifact directory
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn load_context(model_dir: Option<PathBuf>) -> Result<ModelContext, AppError> {
    let config = AppConfig::load()?;
    let dir = model_dir.unwrap_or(config.artifacts.model_dir);
    Ok(ModelContext::load(&dir)?)
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(_) => println!("{value}"),
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let context = load_context(args.model_dir)?;
    let ranked = recommend(&context, &args.description, args.top_n);

    let listings: Vec<_> = ranked
        .iter()
        .map(|entry| {
            json!({
                "score": entry.score,
                "listing": entry.listing,
            })
        })
        .collect();
    print_json(&json!({ "recommendations": listings }));
    Ok(())
}

pub(crate) fn run_filter(args: FilterArgs) -> Result<(), AppError> {
    let context = load_context(args.model_dir)?;
    let criteria = ListingCriteria {
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        min_price: args.min_price,
        max_price: args.max_price,
        category: args.category,
    };
    let results = filter_listings(context.listings(), &criteria);
    print_json(&json!({ "results": results }));
    Ok(())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let context = load_context(args.model_dir)?;
    let features = HouseFeatures {
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        car_spaces: args.car_spaces,
        floor_area_sqm: args.floor_area_sqm,
        land_size_sqm: args.land_size_sqm,
    };
    let projection = project_price(context.price_model(), &features, args.years, args.growth_rate);
    print_json(&json!(projection));
    Ok(())
}

pub(crate) fn run_categories(args: CategoriesArgs) -> Result<(), AppError> {
    let context = load_context(args.model_dir)?;
    print_json(&json!({ "categories": context.categories() }));
    Ok(())
}
