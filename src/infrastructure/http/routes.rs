//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                GET   健康检查
//! - /api/settings/get        GET   获取设置（凭据仅报告是否已设置）
//! - /api/settings/save       POST  保存设置
//! - /api/theme/get           GET   获取主题
//! - /api/theme/set           POST  设置主题
//! - /api/story/list          GET   列出归档故事
//! - /api/story/get           POST  获取故事详情
//! - /api/story/generate      POST  生成新故事
//! - /api/story/continue      POST  续写故事
//! - /api/story/clear         POST  清空归档
//! - /api/assist/keywords     POST  关键词建议
//! - /api/assist/grammar      POST  语法讲解
//! - /api/assist/analyze      POST  译文对问答
//! - /api/assist/explain      POST  短语释义

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/settings", settings_routes())
        .nest("/theme", theme_routes())
        .nest("/story", story_routes())
        .nest("/assist", assist_routes())
}

/// Settings 路由
fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get", get(handlers::get_settings))
        .route("/save", post(handlers::save_settings))
}

/// Theme 路由
fn theme_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get", get(handlers::get_theme))
        .route("/set", post(handlers::set_theme))
}

/// Story 路由
fn story_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_stories))
        .route("/get", post(handlers::get_story))
        .route("/generate", post(handlers::generate_story))
        .route("/continue", post(handlers::continue_story))
        .route("/clear", post(handlers::clear_stories))
}

/// Assist 路由
fn assist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/keywords", post(handlers::suggest_keywords))
        .route("/grammar", post(handlers::explain_grammar))
        .route("/analyze", post(handlers::analyze_translation))
        .route("/explain", post(handlers::explain_phrase))
}
