use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{MetricSet, SubjectDraft, SubjectId};
use super::repository::{RepositoryError, SubjectRepository};
use super::service::{PerformanceService, PerformanceServiceError};

/// Router builder exposing the assessment and ranking endpoints.
pub fn performance_router<R>(service: Arc<PerformanceService<R>>) -> Router
where
    R: SubjectRepository + 'static,
{
    Router::new()
        .route("/api/v1/performance/subjects", post(submit_handler::<R>))
        .route(
            "/api/v1/performance/subjects/:subject_id",
            get(subject_handler::<R>).delete(remove_handler::<R>),
        )
        .route(
            "/api/v1/performance/subjects/:subject_id/metrics",
            put(replace_metrics_handler::<R>),
        )
        .route("/api/v1/performance/rankings", get(rankings_handler::<R>))
        .route("/api/v1/performance/score", post(score_handler::<R>))
        .route(
            "/api/v1/performance/categories/resolve",
            get(resolve_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: PerformanceServiceError) -> Response {
    match error {
        PerformanceServiceError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        PerformanceServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "subject already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        PerformanceServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "subject not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    axum::Json(draft): axum::Json<SubjectDraft>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    let result = service
        .submit(draft)
        .and_then(|subject| service.scored(&subject.id));

    match result {
        Ok(scored) => (StatusCode::CREATED, axum::Json(scored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn subject_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    match service.scored(&SubjectId(subject_id)) {
        Ok(scored) => (StatusCode::OK, axum::Json(scored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn replace_metrics_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    Path(subject_id): Path<String>,
    axum::Json(metrics): axum::Json<MetricSet>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    let id = SubjectId(subject_id);
    let result = service
        .replace_metrics(&id, metrics)
        .and_then(|_| service.scored(&id));

    match result {
        Ok(scored) => (StatusCode::OK, axum::Json(scored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    match service.remove(&SubjectId(subject_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    match service.rankings() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    axum::Json(draft): axum::Json<SubjectDraft>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    match service.score(&draft) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveQuery {
    pub(crate) role: String,
}

pub(crate) async fn resolve_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    Query(query): Query<ResolveQuery>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    let resolved = service.resolve(&query.role);
    let payload = json!({
        "role": query.role,
        "category": resolved.name(),
        "matched": resolved.matched,
        "weights": resolved.weights(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
