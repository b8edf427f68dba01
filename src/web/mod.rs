//! Web 服务器模块
//!
//! 通过 HTTP/JSON 暴露闪卡服务

pub mod handlers;
pub mod routes;
pub mod types;

pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Web 服务器
pub struct WebServer {
    listen_address: String,
    state: Arc<AppState>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(listen_address: impl Into<String>, state: AppState) -> Self {
        Self {
            listen_address: listen_address.into(),
            state: Arc::new(state),
        }
    }

    /// 启动 Web 服务器，直到进程退出
    pub async fn start(&self) -> std::io::Result<()> {
        let app = create_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(&self.listen_address).await?;
        tracing::info!("Web server starting at http://{}", listener.local_addr()?);

        axum::serve(listener, app).await
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    create_routes()
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
