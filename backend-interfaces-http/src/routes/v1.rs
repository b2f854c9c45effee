use axum::Router;

use backend_application::AppState;

use crate::handlers::{match_handlers, ops_handlers, query_handlers, report_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/reports",
            axum::routing::post(report_handlers::submit_report),
        )
        .route(
            "/v1/reports/mine",
            axum::routing::get(query_handlers::list_my_reports),
        )
        .route(
            "/v1/reports/:id/transition",
            axum::routing::post(report_handlers::transition_report),
        )
        .route(
            "/v1/matches",
            axum::routing::post(match_handlers::register_candidate),
        )
        .route(
            "/v1/matches/:id/resolution",
            axum::routing::post(match_handlers::resolve_match),
        )
        .route(
            "/v1/lookup",
            axum::routing::get(query_handlers::lookup_report),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
