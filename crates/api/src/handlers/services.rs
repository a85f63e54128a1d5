use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use servicedex_domain::{DomainError, ServiceInfo, ServiceName};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::{
    dto::{RefreshResponse, ServiceRecordResponse},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services/refresh", post(refresh_services))
        .route("/services/info", get(list_service_info))
        .route("/services/{name}/info", get(get_service_info))
        .route("/services/{name}/reload", post(reload_service_info))
        .route("/services/{name}/disable", post(disable_service))
}

#[instrument(skip(state), name = "api_list_services")]
async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceRecordResponse>>, ApiError> {
    let records = state.get_services.execute().await?;
    debug!(count = records.len(), "Services listed");
    Ok(Json(
        records
            .into_iter()
            .map(ServiceRecordResponse::from_entity)
            .collect(),
    ))
}

#[instrument(skip(state), name = "api_refresh_services")]
async fn refresh_services(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let outcome = state.refresh_services.execute().await?;
    Ok(Json(RefreshResponse::from_outcome(outcome)))
}

async fn list_service_info(State(state): State<AppState>) -> Json<HashMap<String, ServiceInfo>> {
    Json(state.get_service_info.get_all().await)
}

async fn get_service_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ServiceInfo>, ApiError> {
    let name = ServiceName::parse(&name)?;
    state
        .get_service_info
        .get(name.as_str())
        .await
        .map(Json)
        .ok_or_else(|| ApiError(DomainError::ServiceNotFound(name.to_string())))
}

#[instrument(skip(state), name = "api_reload_service_info")]
async fn reload_service_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ServiceInfo>, ApiError> {
    let name = ServiceName::parse(&name)?;
    Ok(Json(state.enrich_service_info.execute(name.as_str()).await))
}

#[instrument(skip(state), name = "api_disable_service")]
async fn disable_service(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ServiceRecordResponse>, ApiError> {
    let record = state.disable_service.execute(&name).await?;
    Ok(Json(ServiceRecordResponse::from_entity(record)))
}
