//! Assist HTTP Handlers - 关键词、语法、译文分析、短语释义

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{AnalyzeTranslationPair, ExplainGrammar, ExplainPhrase, SuggestKeywords};
use crate::infrastructure::http::dto::{
    AnalyzeRequestBody, ApiResponse, ChatResponse, ExplainPhraseRequestBody, ExplanationResponse,
    GrammarRequestBody, KeywordsRequestBody, KeywordsResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn suggest_keywords(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<KeywordsRequestBody>, JsonRejection>,
) -> Result<Json<ApiResponse<KeywordsResponse>>, ApiError> {
    let Json(req) = payload?;
    let keywords = state
        .assist_handler
        .suggest_keywords(SuggestKeywords {
            genre: req.genre,
            target_language: req.target_language,
        })
        .await?;
    Ok(Json(ApiResponse::success(KeywordsResponse { keywords })))
}

pub async fn explain_grammar(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GrammarRequestBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ExplanationResponse>>, ApiError> {
    let Json(req) = payload?;
    let explanation = state
        .assist_handler
        .explain_grammar(ExplainGrammar {
            word_or_phrase: req.word_or_phrase,
            language: req.language,
        })
        .await?;
    Ok(Json(ApiResponse::success(ExplanationResponse { explanation })))
}

pub async fn analyze_translation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequestBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatResponse>>, ApiError> {
    let Json(req) = payload?;
    let response = state
        .assist_handler
        .analyze_translation_pair(AnalyzeTranslationPair {
            source_phrase: req.source_phrase,
            target_phrase: req.target_phrase,
            history: req.history,
        })
        .await?;
    Ok(Json(ApiResponse::success(ChatResponse { response })))
}

pub async fn explain_phrase(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExplainPhraseRequestBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ExplanationResponse>>, ApiError> {
    let Json(req) = payload?;
    let explanation = state
        .assist_handler
        .explain_phrase(ExplainPhrase {
            phrase: req.phrase,
            context: req.context,
            source_language: req.source_language,
            target_language: req.target_language,
        })
        .await?;
    Ok(Json(ApiResponse::success(ExplanationResponse { explanation })))
}
