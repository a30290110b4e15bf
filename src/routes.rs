use crate::config::CostingConfig;
use crate::costing::export::to_csv_string;
use crate::costing::report::{CostReportSummary, ReportTable, Table};
use crate::costing::{calculate_scenario, ReportOptions, Scenario};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) costing: Arc<CostingConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CostReportResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) options: ReportOptions,
    pub(crate) summary: CostReportSummary,
    pub(crate) cost_comparison: Table,
    pub(crate) step_progression: Table,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    pub(crate) table: ReportTable,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/contract/costs", post(cost_report_endpoint))
        .route("/api/v1/contract/costs/export", post(cost_export_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cost_report_endpoint(
    State(state): State<AppState>,
    Json(scenario): Json<Scenario>,
) -> Result<Json<CostReportResponse>, AppError> {
    let report = calculate_scenario(scenario, state.costing.report_defaults())?;

    Ok(Json(CostReportResponse {
        generated_at: Utc::now(),
        options: report.options,
        summary: report.summary(),
        cost_comparison: report.cost_comparison,
        step_progression: report.step_progression,
    }))
}

pub(crate) async fn cost_export_endpoint(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(scenario): Json<Scenario>,
) -> Result<impl IntoResponse, AppError> {
    let report = calculate_scenario(scenario, state.costing.report_defaults())?;
    let csv = to_csv_string(query.table.select(&report))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.costing.export_filename
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
