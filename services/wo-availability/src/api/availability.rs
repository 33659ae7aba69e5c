//! GET /work-orders/{id}/availability

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use monopilot_errors::AppError;
use serde::Deserialize;

use super::error::ApiError;
use super::middleware::AuthCaller;
use super::state::AppState;
use crate::application::{AvailabilityResponse, CheckAvailabilityQuery};

#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    /// 跳过快照缓存
    #[serde(default)]
    pub refresh: bool,
}

pub async fn get_availability(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Path(id): Path<String>,
    params: Result<Query<AvailabilityParams>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;

    let response = state
        .handler
        .check(CheckAvailabilityQuery {
            wo_id: id,
            tenant_id: caller.tenant_id,
            refresh: params.refresh,
        })
        .await?;

    Ok(Json(response))
}
