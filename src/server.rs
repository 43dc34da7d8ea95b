//! HTTP surface: accepts a schema submission and runs one generation per request.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::codegen::schema_loader::extract_request_data;
use crate::codegen::Generator;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;

pub const GENERATE_ROUTE: &str = "/api/template-generator";

pub struct AppState {
    pub generator: Generator,
}

/// Reply body; `status` mirrors the HTTP status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub message: String,
    pub status: u16,
}

impl GenerateResponse {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(GENERATE_ROUTE, post(generate_slice))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &GeneratorConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState {
        generator: Generator::from_config(config),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Template generator listening on {}", listener.local_addr()?);
    tracing::info!("Writing slices under {}", config.project_root.display());

    axum::serve(listener, app).await
}

/// Generate one slice from `{ data: <schema JSON string> }`.
///
/// Body rejections (size limit, read errors) and non-UTF-8 bodies take the
/// same 500 path as any other malformed submission.
pub async fn generate_slice(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let body = body.map_err(|e| GenerationError::SchemaParse(format!("unreadable request body: {}", e)))?;
    let body = std::str::from_utf8(&body)
        .map_err(|e| GenerationError::SchemaParse(format!("request body is not UTF-8: {}", e)))?;
    let schema_json = extract_request_data(body)?;
    let generator = state.generator.clone();

    let report = tokio::task::spawn_blocking(move || generator.generate(&schema_json))
        .await
        .map_err(|e| AppError::Internal(format!("generation task failed: {}", e)))??;

    Ok(Json(GenerateResponse::new(
        StatusCode::OK,
        format!(
            "Generated {} files for '{}' under src/app/{}/{}",
            report.files.len(),
            report.folder_name,
            report.root,
            report.folder_name
        ),
    )))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "template-generator",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// Error handling

/// Every failure maps to the same generic 500 reply; details go to the log
#[derive(Debug)]
pub enum AppError {
    Generation(GenerationError),
    Internal(String),
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            AppError::Generation(e) => tracing::error!(kind = e.kind(), error = %e, "request failed"),
            AppError::Internal(msg) => tracing::error!(error = %msg, "request failed"),
        }

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Json(GenerateResponse::new(status, "Failed to generate slice"))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::NamingKeys;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state(dir: &TempDir) -> Arc<AppState> {
        Arc::new(AppState {
            generator: Generator::new(dir.path(), NamingKeys::default()),
        })
    }

    fn body(schema: serde_json::Value) -> std::result::Result<Bytes, BytesRejection> {
        Ok(Bytes::from(serde_json::json!({ "data": schema.to_string() }).to_string()))
    }

    async fn post_raw(dir: &TempDir, payload: Vec<u8>) -> (StatusCode, GenerateResponse) {
        let request = Request::builder()
            .method("POST")
            .uri(GENERATE_ROUTE)
            .body(Body::from(payload))
            .unwrap();
        let response = router(state(dir)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_generate_slice_ok() {
        let dir = TempDir::new().unwrap();
        let schema = serde_json::json!({
            "namingConvention": {"Users_1_000___": "Posts", "users_2_000___": "posts", "User_3_000___": "Post"},
            "fields": [{"name": "title", "type": "STRING"}]
        });

        let Json(reply) = generate_slice(State(state(&dir)), body(schema)).await.unwrap();
        assert_eq!(reply.status, 200);
        assert!(reply.message.contains("src/app/dashboard/posts"));
        assert!(dir.path().join("src/app/dashboard/posts/all/page.tsx").is_file());
    }

    #[tokio::test]
    async fn test_missing_key_is_500() {
        let dir = TempDir::new().unwrap();
        let schema = serde_json::json!({
            "namingConvention": {"users_2_000___": "posts", "User_3_000___": "Post"},
            "fields": []
        });

        let err = generate_slice(State(state(&dir)), body(schema)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Generation(GenerationError::MissingNamingField { ref key }) if key == "Users_1_000___"
        ));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!dir.path().join("src").exists());
    }

    #[tokio::test]
    async fn test_body_without_data_is_500() {
        let dir = TempDir::new().unwrap();
        let err = generate_slice(State(state(&dir)), Ok(Bytes::from_static(b"{\"nope\": 1}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(GenerationError::SchemaParse(_))));
    }

    #[tokio::test]
    async fn test_health() {
        let Json(value) = health_check().await;
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_500_json() {
        let dir = TempDir::new().unwrap();
        let (status, reply) = post_raw(&dir, b"{\"data\": \"\xff\xfe\"}".to_vec()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.status, 500);
        assert_eq!(reply.message, "Failed to generate slice");
    }

    #[tokio::test]
    async fn test_oversized_body_is_500_json() {
        let dir = TempDir::new().unwrap();
        let (status, reply) = post_raw(&dir, vec![b' '; 3 * 1024 * 1024]).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.status, 500);
    }

    #[tokio::test]
    async fn test_router_generates_slice() {
        let dir = TempDir::new().unwrap();
        let schema = serde_json::json!({
            "namingConvention": {"Users_1_000___": "Posts", "users_2_000___": "posts", "User_3_000___": "Post"},
            "fields": [{"name": "title", "type": "STRING"}]
        });
        let payload = serde_json::json!({ "data": schema.to_string() }).to_string().into_bytes();
        let (status, reply) = post_raw(&dir, payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply.status, 200);
        assert!(dir.path().join("src/app/dashboard/posts/all/page.tsx").is_file());
    }
}
