//! HTTP API for the fund directory.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use fundatlas_catalog::{FundCatalog, FundProfile};
use fundatlas_db::{queries, DbPool};
use fundatlas_directory::{paginate, FundFilters, FundPage, DEFAULT_PAGE_SIZE};
use fundatlas_intro::{draft_intro, IntroDraft, IntroError};
use fundatlas_telemetry::{audit, Metrics};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::error;

/// Shared state behind every handler.
pub struct AppState {
    pub db: DbPool,
    pub catalog: RwLock<FundCatalog>,
    pub metrics: Metrics,
    pub audit_output_path: Option<String>,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics_handler))
        .route("/funds", get(list_funds))
        .route("/funds/:id", get(get_fund))
        .route("/funds/:id/intro", get(get_intro))
        .route("/stages", get(list_stages))
        .route("/themes", get(list_themes))
        .route("/investor-types", get(list_investor_types))
        .route("/investment-foci", get(list_investment_foci))
        .route("/users/:id/profile", put(update_profile))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn metrics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    match state.metrics.gather() {
        Ok(body) => Ok((StatusCode::OK, body)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[derive(Deserialize)]
struct FundListQuery {
    search: Option<String>,
    cheque_range: Option<String>,
    stage_id: Option<i64>,
    theme_id: Option<i64>,
    created_from: Option<NaiveDate>,
    created_to: Option<NaiveDate>,
    page: Option<usize>,
    per_page: Option<usize>,
}

async fn list_funds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FundListQuery>,
) -> Result<Json<FundPage>, (StatusCode, String)> {
    let cheque_range = match query.cheque_range.as_deref() {
        Some(raw) => Some(
            raw.parse()
                .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, format!("{e}")))?,
        ),
        None => None,
    };

    let filters = FundFilters {
        search: query.search,
        cheque_range,
        stage_id: query.stage_id,
        theme_id: query.theme_id,
        created_from: query.created_from,
        created_to: query.created_to,
    };

    let start = Instant::now();
    let catalog = state.catalog.read().await;
    let filtered = filters.apply(catalog.profiles());
    let page = paginate(
        &filtered,
        catalog.len(),
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    drop(catalog);

    state.metrics.inc_directory_queries();
    state
        .metrics
        .observe_query_latency("list_funds", start.elapsed().as_secs_f64());

    Ok(Json(page))
}

async fn get_fund(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<i64>,
) -> Result<Json<FundProfile>, StatusCode> {
    let catalog = state.catalog.read().await;
    match catalog.profile(fund_id) {
        Some(profile) => Ok(Json(profile.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn list_stages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.read().await.stages().to_vec())
}

async fn list_themes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.read().await.themes().to_vec())
}

async fn list_investor_types(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.read().await.investor_types().to_vec())
}

async fn list_investment_foci(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.read().await.investment_focuses().to_vec())
}

#[derive(Deserialize)]
struct IntroQuery {
    user_id: i64,
}

async fn get_intro(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<i64>,
    Query(query): Query<IntroQuery>,
) -> Result<Json<IntroDraft>, (StatusCode, String)> {
    match draft_intro(&state.db, query.user_id, fund_id).await {
        Ok(draft) => {
            state.metrics.inc_intro_drafts();
            if let Err(e) =
                audit::write_audit_sample(state.audit_output_path.as_deref(), &draft)
            {
                error!("Failed to write intro audit sample: {}", e);
            }
            Ok(Json(draft))
        }
        Err(e) => Err(intro_error_response(&state, e)),
    }
}

fn intro_error_response(state: &AppState, e: IntroError) -> (StatusCode, String) {
    let status = match &e {
        IntroError::UserNotFound(_)
        | IntroError::FundNotFound(_)
        | IntroError::NoPortfolioCompany(_) => StatusCode::NOT_FOUND,
        IntroError::ProfileIncomplete => StatusCode::CONFLICT,
        IntroError::Db(_) => {
            state.metrics.inc_db_errors();
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

#[derive(Deserialize)]
struct ProfileUpdate {
    first_name: String,
    last_name: String,
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(update): Json<ProfileUpdate>,
) -> Result<StatusCode, (StatusCode, String)> {
    if update.first_name.trim().is_empty() || update.last_name.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "first_name and last_name must not be blank".to_string(),
        ));
    }

    match queries::update_user_name(
        state.db.pool(),
        user_id,
        update.first_name.trim(),
        update.last_name.trim(),
    )
    .await
    {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, format!("User not found: {user_id}"))),
        Err(e) => {
            state.metrics.inc_db_errors();
            error!("Profile update failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Profile update failed".to_string(),
            ))
        }
    }
}
