//! Ping Handler

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::{AppState, BusyAction};

/// Ping 响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stories: usize,
    pub generating: bool,
    pub continuing: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        stories: state.archive.len(),
        generating: state.busy.is_busy(BusyAction::Generate),
        continuing: state.busy.is_busy(BusyAction::Continue),
    })
}
