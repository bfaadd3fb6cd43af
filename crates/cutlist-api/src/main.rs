use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cutlist_core::{compute_from_value, CutlistError, MaterialSummary, StockSettings};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Body of a cut-list request.
///
/// Both fields stay untyped so the extractor never rejects a body: a
/// half-filled form still gets a (zeroed) answer, bad settings get a 400.
#[derive(Debug, Deserialize)]
struct CutlistRequest {
    #[serde(default)]
    config: serde_json::Value,
    #[serde(default)]
    settings: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Door Cut-List API");

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind to port 3000");

    info!("API server listening on http://0.0.0.0:3000");
    info!("Try: curl http://localhost:3000/api/health");

    axum::serve(listener, app()).await.expect("Server error");
}

fn app() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/catalogue", get(catalogue))
        .route("/api/cutlist", post(cutlist))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "door-cutlist-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Default stock settings, so the UI can show the catalogue
async fn catalogue() -> Json<StockSettings> {
    Json(StockSettings::default())
}

/// Main cut-list endpoint
async fn cutlist(Json(request): Json<CutlistRequest>) -> Result<Json<MaterialSummary>, AppError> {
    let settings = match request.settings {
        Some(value) => {
            serde_json::from_value::<StockSettings>(value).map_err(CutlistError::from)?
        }
        None => StockSettings::default(),
    };
    settings.validate()?;

    let summary = compute_from_value(&request.config, &settings);

    if summary.fallback {
        info!("Configuration incomplete, returning zeroed summary");
    } else {
        info!(
            "Cut-list complete: {} bars, {} sheets, {:.2}% sheet waste",
            summary.prism.bars_needed, summary.mdf.sheets_needed, summary.mdf.waste_percentage
        );
    }

    Ok(Json(summary))
}

/// Application error type
struct AppError(anyhow::Error);

impl From<CutlistError> for AppError {
    fn from(err: CutlistError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<CutlistError>() {
            Some(_) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cutlist_returns_summary() {
        let (status, body) = post_json(
            "/api/cutlist",
            json!({
                "config": {
                    "width": 900,
                    "height": 2000,
                    "thickness": 40,
                    "prism_count": 1,
                    "layers": [6, 4]
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], json!(false));
        assert_eq!(body["mdf"]["thickness_labels"], json!(["6mm", "4mm"]));
        assert_eq!(body["prism"]["bars_needed"], json!(2));
    }

    #[tokio::test]
    async fn test_incomplete_config_gets_zeroed_summary() {
        let (status, body) = post_json(
            "/api/cutlist",
            json!({ "config": { "width": 900, "height": "" } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], json!(true));
        assert_eq!(body["assembly"]["total_mass"], json!(0.0));
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let (status, body) = post_json(
            "/api/cutlist",
            json!({
                "config": { "width": 900, "height": 2000, "thickness": 40, "prism_count": 1 },
                "settings": { "sheet_formats": [] }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("sheet format"));
    }

    #[tokio::test]
    async fn test_empty_body_gets_zeroed_summary() {
        let (status, body) = post_json("/api/cutlist", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], json!(true));
        assert_eq!(body["prism"]["bars_needed"], json!(0));
    }

    #[tokio::test]
    async fn test_mistyped_settings_rejected_as_json() {
        let (status, body) = post_json(
            "/api/cutlist",
            json!({
                "config": { "width": 900, "height": 2000, "thickness": 40, "prism_count": 1 },
                "settings": { "standard_length": "x" }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Malformed"));
    }

    #[tokio::test]
    async fn test_null_settings_use_defaults() {
        let (status, body) = post_json(
            "/api/cutlist",
            json!({
                "config": { "width": 1200, "height": 1200, "thickness": 40, "prism_count": 1 },
                "settings": null
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prism"]["standard_length"], json!(3000.0));
        assert_eq!(body["prism"]["bars_needed"], json!(2));
    }
}
