//! Settings HTTP Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{GetSettings, GetTheme, SaveSettings, SetTheme};
use crate::domain::settings::UserSettings;
use crate::infrastructure::http::dto::{ApiResponse, SaveSettingsRequest, SettingsResponse, ThemeBody};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取设置
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let settings = state.get_settings_handler.handle(GetSettings).await?;
    Ok(Json(ApiResponse::success(settings.into())))
}

/// 保存设置（整体覆盖）
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveSettingsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let Json(req) = payload?;

    let credential = match req.credential {
        Some(credential) => credential,
        None => state.get_settings_handler.handle(GetSettings).await?.credential,
    };

    let saved = state
        .save_settings_handler
        .handle(SaveSettings {
            settings: UserSettings {
                source_language: req.source_language,
                target_language: req.target_language,
                level: req.level,
                credential,
            },
        })
        .await?;

    Ok(Json(ApiResponse::success(saved.into())))
}

/// 获取主题
pub async fn get_theme(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ThemeBody>>, ApiError> {
    let theme = state.get_theme_handler.handle(GetTheme).await?;
    Ok(Json(ApiResponse::success(ThemeBody { theme })))
}

/// 设置主题
pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ThemeBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ThemeBody>>, ApiError> {
    let Json(req) = payload?;
    let theme = state
        .set_theme_handler
        .handle(SetTheme { theme: req.theme })
        .await?;
    Ok(Json(ApiResponse::success(ThemeBody { theme })))
}
