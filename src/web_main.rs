//! Web 服务器主程序入口

use std::sync::Arc;

use clap::Parser;

use flashcards::config::{AppConfig, StoreBackend};
use flashcards::env;
use flashcards::service::FlashcardService;
use flashcards::store::{FlashcardStore, MemoryFlashcardStore, MongoFlashcardStore};
use flashcards::translation::{OpenAiTranslator, Translator};
use flashcards::web::{AppState, WebServer};

#[derive(Parser)]
#[command(name = "flashcards-server", version, about = "Flashcard HTTP API with AI-assisted translation")]
struct Cli {
    /// Bind address (overrides FLASHCARDS_BIND_ADDRESS)
    #[arg(short, long)]
    bind: Option<String>,
    /// Port number (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,
    /// Use the in-memory store instead of MongoDB
    #[arg(long)]
    memory: bool,
    /// Print environment variable documentation and exit
    #[arg(long)]
    env_docs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", env::generate_env_docs());
        return Ok(());
    }

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.memory {
        config.store = StoreBackend::Memory;
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .init();
    config.log_summary();

    let store: Arc<dyn FlashcardStore> = match config.store {
        StoreBackend::Mongo => {
            let store = MongoFlashcardStore::connect(&config.mongo_config()).await?;
            store.ping().await?;
            store.ensure_indexes().await?;
            tracing::info!("MongoDB 连接成功: {}/{}", config.db_name, config.collection);
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("使用内存存储，重启后数据将丢失");
            Arc::new(MemoryFlashcardStore::new())
        }
    };

    let translator: Option<Arc<dyn Translator>> = match config.openai_config() {
        Some(openai) => Some(Arc::new(OpenAiTranslator::new(openai)?) as Arc<dyn Translator>),
        None => {
            tracing::warn!("未设置 OPENAI_API_KEY，AI翻译和提示功能不可用");
            None
        }
    };

    let service = FlashcardService::new(store, translator, config.service_config());
    let server = WebServer::new(config.listen_address(), AppState::new(service));
    server.start().await?;

    Ok(())
}
