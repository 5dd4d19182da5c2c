use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::data::loader;
use crate::error::{AppError, Result};
use crate::filter::GraphFilter;
use crate::projection::project;
use crate::render::{self, encoding};
use crate::types::{BattedBallEvent, GraphRequest, GraphResponse, RawEvent};

#[derive(Clone)]
pub struct ApiState {
    pub csv_path: Arc<PathBuf>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/data", get(get_data))
        .route("/api/graph", post(post_graph))
        // SPA frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "spraychart server is running"
}

/// Full dataset minus incomplete rows, keyed by the CSV column names.
async fn get_data(State(state): State<ApiState>) -> Result<Json<Vec<BattedBallEvent>>> {
    let path = Arc::clone(&state.csv_path);
    let events =
        tokio::task::spawn_blocking(move || loader::load_complete_events(&path)).await??;
    info!(rows = events.len(), "served data listing");
    Ok(Json(events))
}

/// Filters the dataset, projects hit locations, renders the spray chart
/// and returns it as base64 PNG.
async fn post_graph(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<GraphResponse>> {
    let request: GraphRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid graph request: {e}")))?;
    let filter = GraphFilter::from_request(request)?;

    let path = Arc::clone(&state.csv_path);
    let image = tokio::task::spawn_blocking(move || -> Result<String> {
        let events = loader::load_events(&path)?;
        let rows = filter.apply(&events);
        if rows.is_empty() {
            return Err(AppError::NoData(
                "No data available for the specified filters".to_string(),
            ));
        }
        let points: Vec<(&RawEvent, (f64, f64))> = rows
            .iter()
            .filter_map(|ev| project(ev).map(|p| (*ev, p)))
            .collect();
        info!(
            matched = rows.len(),
            plotted = points.len(),
            color_by = ?filter.color_by,
            "rendering graph"
        );
        let layers = encoding::build_layers(&points, &filter);
        render::render_graph(&layers)
    })
    .await??;

    Ok(Json(GraphResponse { image }))
}
