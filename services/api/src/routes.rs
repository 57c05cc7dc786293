use crate::infra::{
    lenient_f64, lenient_opt_count, lenient_opt_f64, lenient_opt_top_n, lenient_years, AppState,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use homescout::artifacts::{HouseFeatures, Listing, ModelContext};
use homescout::error::AppError;
use homescout::query::{
    filter_listings, project_price, recommend, ListingCriteria, DEFAULT_GROWTH_RATE, DEFAULT_TOP_N,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendRequest {
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "lenient_opt_top_n")]
    pub(crate) top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendResponse {
    pub(crate) success: bool,
    pub(crate) recommendations: Vec<Listing>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterRequest {
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub(crate) bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub(crate) bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub(crate) min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub(crate) max_price: Option<f64>,
    #[serde(default)]
    pub(crate) category: Option<String>,
}

impl From<FilterRequest> for ListingCriteria {
    fn from(request: FilterRequest) -> Self {
        ListingCriteria {
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            min_price: request.min_price,
            max_price: request.max_price,
            category: request.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FilterResponse {
    pub(crate) success: bool,
    pub(crate) results: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictPriceRequest {
    #[serde(deserialize_with = "lenient_f64")]
    pub(crate) bedrooms: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub(crate) bathrooms: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub(crate) car_spaces: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub(crate) floor_area_sqm: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub(crate) land_size_sqm: f64,
    #[serde(deserialize_with = "lenient_years")]
    pub(crate) years: i32,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub(crate) growth_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictPriceResponse {
    pub(crate) success: bool,
    pub(crate) current_price: f64,
    pub(crate) future_price: f64,
    pub(crate) years: i32,
    pub(crate) growth_rate: f64,
    pub(crate) appreciation: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoriesResponse {
    pub(crate) success: bool,
    pub(crate) categories: Vec<String>,
}

/// Routes backed by the loaded artifact store.
pub(crate) fn query_router(context: Arc<ModelContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/recommend", post(recommend_endpoint))
        .route("/filter", post(filter_endpoint))
        .route("/predict-price", post(predict_price_endpoint))
        .route("/get-categories", get(categories_endpoint))
        .with_state(context)
}

pub(crate) fn with_service_routes(context: Arc<ModelContext>) -> Router {
    query_router(context)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn recommend_endpoint(
    State(context): State<Arc<ModelContext>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) = payload.map_err(reject)?;
    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);

    let recommendations = recommend(&context, &request.description, top_n)
        .into_iter()
        .map(|ranked| ranked.listing.clone())
        .collect();

    Ok(Json(RecommendResponse {
        success: true,
        recommendations,
    }))
}

pub(crate) async fn filter_endpoint(
    State(context): State<Arc<ModelContext>>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterResponse>, AppError> {
    let Json(request) = payload.map_err(reject)?;
    let criteria = ListingCriteria::from(request);

    let results = filter_listings(context.listings(), &criteria)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(FilterResponse {
        success: true,
        results,
    }))
}

pub(crate) async fn predict_price_endpoint(
    State(context): State<Arc<ModelContext>>,
    payload: Result<Json<PredictPriceRequest>, JsonRejection>,
) -> Result<Json<PredictPriceResponse>, AppError> {
    let Json(request) = payload.map_err(reject)?;
    let features = HouseFeatures {
        bedrooms: request.bedrooms,
        bathrooms: request.bathrooms,
        car_spaces: request.car_spaces,
        floor_area_sqm: request.floor_area_sqm,
        land_size_sqm: request.land_size_sqm,
    };
    let growth_rate = request.growth_rate.unwrap_or(DEFAULT_GROWTH_RATE);

    let projection = project_price(context.price_model(), &features, request.years, growth_rate);
    if !projection.current_price.is_finite()
        || !projection.future_price.is_finite()
        || !projection.appreciation.is_finite()
    {
        return Err(AppError::Validation(
            "projection overflows to a non-finite price; reduce years or growth_rate".to_string(),
        ));
    }

    Ok(Json(PredictPriceResponse {
        success: true,
        current_price: projection.current_price,
        future_price: projection.future_price,
        years: projection.years,
        growth_rate: projection.growth_rate,
        appreciation: projection.appreciation,
    }))
}

pub(crate) async fn categories_endpoint(
    State(context): State<Arc<ModelContext>>,
) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        success: true,
        categories: context.categories(),
    })
}

fn reject(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}
