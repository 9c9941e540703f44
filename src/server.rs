use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::Result;

#[derive(Clone)]
struct PageState {
    page_path: Arc<PathBuf>,
}

/// Serves one HTML page at `/` and `/<filename>`; everything else is 404.
pub struct StaticServer {
    config: ServerConfig,
}

impl StaticServer {
    pub fn new(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        let state = PageState {
            page_path: Arc::new(self.config.page_path()),
        };
        let page = get(serve_page).fallback(not_found);

        let router = Router::new()
            .route("/", page.clone())
            .route(&format!("/{}", self.config.filename), page)
            .fallback(not_found)
            .with_state(state);

        let router = if self.config.cors {
            router.layer(cors_layer())
        } else {
            router
        };

        router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.router();
        info!(
            page = %self.config.page_path().display(),
            cors = self.config.cors,
            "Listening on http://localhost:{}",
            listener.local_addr()?.port()
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn serve_page(State(state): State<PageState>) -> Response {
    match tokio::fs::read(state.page_path.as_path()).await {
        Ok(contents) => ([(header::CONTENT_TYPE, "text/html")], contents).into_response(),
        Err(e) => {
            error!(path = %state.page_path.display(), error = %e, "Failed to read page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                "Internal Server Error",
            )
                .into_response()
        }
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Not Found",
    )
        .into_response()
}
