//! HTTP handlers for the REST API.
//!
//! Each handler parses the channel selection and delegates to the shared
//! [`DashboardContext`](crate::services::DashboardContext).

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::{debug, warn};

use super::dto::{ChannelOptions, ChannelQuery, ErrorBarsData, Figure, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{Selection, SelectionError};
use crate::services::DashboardContext;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Which view's default applies when the query names no channels.
#[derive(Debug, Clone, Copy)]
enum View {
    Plot,
    ErrorBars,
}

fn resolve_selection(
    context: &DashboardContext,
    query: &ChannelQuery,
    view: View,
) -> Result<Selection, SelectionError> {
    match (&query.channels, view) {
        (Some(raw), _) => Selection::parse(raw, context.channels()),
        (None, View::Plot) => Ok(context.plot_default()),
        (None, View::ErrorBars) => Ok(context.error_bars_default()),
    }
}

// =============================================================================
// Page
// =============================================================================

/// GET /
///
/// The single-page dashboard shell.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        buckets: state.context.series().len(),
        channels: state.context.channels().len(),
    }))
}

// =============================================================================
// Views
// =============================================================================

/// GET /v1/channels
///
/// Selectable channels and each view's initial selection.
pub async fn list_channels(State(state): State<AppState>) -> HandlerResult<ChannelOptions> {
    Ok(Json(state.context.channel_options()))
}

/// GET /v1/plot?channels=a,b
///
/// Line chart of the selected channels.
pub async fn get_plot(
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
) -> HandlerResult<Figure> {
    let selection = resolve_selection(&state.context, &query, View::Plot)?;
    debug!("Plot view for {:?}", selection.columns());

    let context = state.context.clone();
    let figure = tokio::task::spawn_blocking(move || context.plot(&selection))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(figure))
}

/// GET /v1/error-bars?channels=a,b,c
///
/// Chart with rolling-deviation error bars plus the statistical summary.
pub async fn get_error_bars(
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
) -> HandlerResult<ErrorBarsData> {
    let selection = resolve_selection(&state.context, &query, View::ErrorBars)?;
    debug!("Error-bars view for {:?}", selection.columns());

    let context = state.context.clone();
    let data = tokio::task::spawn_blocking(move || context.error_bars(&selection))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| {
            warn!("Comparison failed: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(data))
}
