//! Story HTTP Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{ClearArchive, ContinueStory, GenerateStory, GetStory, ListStories};
use crate::domain::story::ArchivedStory;
use crate::infrastructure::http::dto::{ApiResponse, Empty, GenerateStoryRequest, StoryIdRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::{AppState, BusyAction};

fn busy_error(action: BusyAction) -> ApiError {
    ApiError::Conflict(format!("{} 正在进行中，请稍后再试", action.as_str()))
}

/// 列出归档故事（最新在前）
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ArchivedStory>>>, ApiError> {
    let stories = state.list_stories_handler.handle(ListStories).await?;
    Ok(Json(ApiResponse::success(stories)))
}

/// 获取单个故事
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StoryIdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ArchivedStory>>, ApiError> {
    let Json(req) = payload?;
    let story = state
        .get_story_handler
        .handle(GetStory { story_id: req.id })
        .await?;
    Ok(Json(ApiResponse::success(story)))
}

/// 生成新故事并归档
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateStoryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ArchivedStory>>, ApiError> {
    let Json(req) = payload?;
    let _guard = state
        .busy
        .try_acquire(BusyAction::Generate)
        .ok_or_else(|| busy_error(BusyAction::Generate))?;

    let story = state
        .generate_story_handler
        .handle(GenerateStory {
            genre: req.genre,
            prompt: req.prompt,
        })
        .await?;

    Ok(Json(ApiResponse::success(story)))
}

/// 续写故事
pub async fn continue_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StoryIdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ArchivedStory>>, ApiError> {
    let Json(req) = payload?;
    let _guard = state
        .busy
        .try_acquire(BusyAction::Continue)
        .ok_or_else(|| busy_error(BusyAction::Continue))?;

    let story = state
        .continue_story_handler
        .handle(ContinueStory { story_id: req.id })
        .await?;

    Ok(Json(ApiResponse::success(story)))
}

/// 清空归档
pub async fn clear_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.clear_archive_handler.handle(ClearArchive).await?;
    Ok(Json(ApiResponse::ok()))
}
