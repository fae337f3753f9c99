//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体上限（故事历史随请求回传，留足余量）
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5080,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS 配置 - 允许所有来源的跨域请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    create_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone());
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::SettingsStorePort;
    use crate::domain::settings::UserSettings;
    use crate::infrastructure::adapters::llm::{FakeStoryGenerator, FakeStoryGeneratorConfig};
    use crate::infrastructure::memory::{InMemorySettingsStore, InMemoryStoryArchive};
    use crate::infrastructure::persistence::JsonPersistence;

    fn test_app(config: FakeStoryGeneratorConfig) -> (Router, Arc<FakeStoryGenerator>) {
        let archive = InMemoryStoryArchive::new(JsonPersistence::unavailable()).arc();
        let settings = InMemorySettingsStore::new(JsonPersistence::unavailable()).arc();
        settings.set(UserSettings {
            source_language: "English".to_string(),
            target_language: "Spanish".to_string(),
            level: "A2".to_string(),
            credential: "test-key".to_string(),
        });
        let generator = Arc::new(FakeStoryGenerator::new(config));

        let state = AppState::new(archive, settings, generator.clone(), None);
        (build_router(Arc::new(state)), generator)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn generate(app: &Router, prompt: &str) -> Value {
        call(
            app,
            "POST",
            "/api/story/generate",
            Some(json!({"genre": "Adventure", "prompt": prompt})),
        )
        .await
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());

        let body = call(&app, "GET", "/api/ping", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["stories"], 0);
    }

    #[tokio::test]
    async fn test_generate_continue_and_list() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());

        let created = generate(&app, "A journey across the desert").await;
        assert_eq!(created["errno"], 0);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["storyParts"].as_array().unwrap().len(), 2);
        assert!(created["data"]["params"].get("credential").is_none());

        let continued = call(&app, "POST", "/api/story/continue", Some(json!({"id": id}))).await;
        assert_eq!(continued["errno"], 0);
        assert_eq!(continued["data"]["id"], id.as_str());
        assert_eq!(continued["data"]["storyParts"].as_array().unwrap().len(), 3);

        let list = call(&app, "GET", "/api/story/list", None).await;
        let stories = list["data"].as_array().unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0]["storyParts"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_validation_error_envelope() {
        let (app, generator) = test_app(FakeStoryGeneratorConfig::default());

        let body = generate(&app, "short").await;
        assert_eq!(body["errno"], 400);
        assert!(body["data"].is_null());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_503() {
        let (app, generator) = test_app(FakeStoryGeneratorConfig::default());
        generator.set_failure(Some("upstream down"));

        let body = generate(&app, "A journey across the desert").await;
        assert_eq!(body["errno"], 503);

        let list = call(&app, "GET", "/api/story/list", None).await;
        assert_eq!(list["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_story_is_404() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());

        let body = call(
            &app,
            "POST",
            "/api/story/get",
            Some(json!({"id": uuid::Uuid::new_v4().to_string()})),
        )
        .await;
        assert_eq!(body["errno"], 404);

        let malformed = call(&app, "POST", "/api/story/get", Some(json!({"id": "nope"}))).await;
        assert_eq!(malformed["errno"], 400);
    }

    #[tokio::test]
    async fn test_concurrent_generate_conflicts() {
        let (app, _) = test_app(FakeStoryGeneratorConfig {
            delay_ms: 300,
            ..Default::default()
        });

        let first_app = app.clone();
        let first = tokio::spawn(async move { generate(&first_app, "The first long story").await });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let second = generate(&app, "The second long story").await;
        assert_eq!(second["errno"], 409);

        let first = first.await.unwrap();
        assert_eq!(first["errno"], 0);

        let third = generate(&app, "The third long story").await;
        assert_eq!(third["errno"], 0);
    }

    #[tokio::test]
    async fn test_settings_hide_credential() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());

        let body = call(&app, "GET", "/api/settings/get", None).await;
        assert_eq!(body["data"]["credentialSet"], true);
        assert!(body["data"].get("credential").is_none());

        // 省略凭据时保留原值
        let saved = call(
            &app,
            "POST",
            "/api/settings/save",
            Some(json!({"sourceLanguage": "English", "targetLanguage": "Italian", "level": "B2"})),
        )
        .await;
        assert_eq!(saved["data"]["targetLanguage"], "Italian");
        assert_eq!(saved["data"]["credentialSet"], true);

        let cleared = call(
            &app,
            "POST",
            "/api/settings/save",
            Some(json!({"sourceLanguage": "English", "targetLanguage": "Italian", "level": "B2", "credential": ""})),
        )
        .await;
        assert_eq!(cleared["data"]["credentialSet"], false);
    }

    #[tokio::test]
    async fn test_theme_round_trip() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());

        let initial = call(&app, "GET", "/api/theme/get", None).await;
        assert_eq!(initial["data"]["theme"], "system");

        call(&app, "POST", "/api/theme/set", Some(json!({"theme": "dark"}))).await;
        let updated = call(&app, "GET", "/api/theme/get", None).await;
        assert_eq!(updated["data"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_clear_archive() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());
        generate(&app, "A journey across the desert").await;

        let body = call(&app, "POST", "/api/story/clear", None).await;
        assert_eq!(body["errno"], 0);

        let list = call(&app, "GET", "/api/story/list", None).await;
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assist_analyze() {
        let (app, _) = test_app(FakeStoryGeneratorConfig::default());

        let body = call(
            &app,
            "POST",
            "/api/assist/analyze",
            Some(json!({
                "sourcePhrase": "good night",
                "targetPhrase": "buenas noches",
                "history": [{"role": "user", "content": "Why plural?"}]
            })),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["response"], "good night -> buenas noches: Why plural?");
    }
}
