//! LinguaTales - 语言学习故事生成服务
//!
//! - Domain: story/, generation/, settings/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters

use std::sync::Arc;

use linguatales::application::StoryGeneratorPort;
use linguatales::config::{load_config, print_config, AppConfig};
use linguatales::domain::generation::Credential;
use linguatales::infrastructure::adapters::{GeminiClientConfig, GeminiStoryGenerator};
use linguatales::infrastructure::http::{AppState, HttpServer, ServerConfig};
use linguatales::infrastructure::memory::{InMemorySettingsStore, InMemoryStoryArchive};
use linguatales::infrastructure::persistence::{JsonPersistence, SledKeyValueStore, SledStoreConfig};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.filter_directive()));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 打开 sled 存储；失败时降级为仅会话内存
fn open_persistence(config: &AppConfig) -> JsonPersistence {
    if !config.storage.enabled {
        tracing::warn!("Persistence disabled, data lives for this session only");
        return JsonPersistence::unavailable();
    }

    if let Some(parent) = std::path::Path::new(&config.storage.db_path).parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(path = %parent.display(), error = %e, "Failed to create data directory");
        }
    }

    let sled_config = SledStoreConfig {
        db_path: config.storage.db_path.clone(),
    };
    match SledKeyValueStore::new(&sled_config) {
        Ok(store) => JsonPersistence::new(store.arc()),
        Err(e) => {
            tracing::warn!(
                db_path = %config.storage.db_path,
                error = %e,
                "Storage unavailable, falling back to session-only memory"
            );
            JsonPersistence::unavailable()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("LinguaTales - 语言学习故事生成服务");
    print_config(&config);

    // 持久化与存储
    let persistence = open_persistence(&config);
    let archive = InMemoryStoryArchive::new(persistence.clone()).arc();
    let settings = InMemorySettingsStore::new(persistence).arc();

    // 创建 Gemini 生成客户端
    let llm_config = GeminiClientConfig::new(&config.llm.base_url)
        .with_models(&config.llm.model, &config.llm.aux_model)
        .with_timeout(config.llm.timeout_secs)
        .with_max_retries(config.llm.max_retries);
    let generator = Arc::new(GeminiStoryGenerator::new(llm_config)?);

    let probe = generator.clone();
    tokio::spawn(async move {
        if probe.health_check().await {
            tracing::info!("LLM endpoint reachable");
        } else {
            tracing::warn!("LLM endpoint unreachable, generation requests will fail until it recovers");
        }
    });

    let fallback_credential = config.llm.api_key.as_deref().and_then(Credential::new);

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(archive, settings, generator, fallback_credential);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
