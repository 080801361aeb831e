//! RC Section Solver HTTP Server

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::info;
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use rc_section_solver::api::{self, ApiResponse, SectionRequest};
use rc_section_solver::error::SectionResult;

const DEFAULT_ADDR: &str = "0.0.0.0:8086";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn respond<T: Serialize>(result: SectionResult<T>) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = if result.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(ApiResponse::from_result(result)))
}

async fn diagram(Json(request): Json<SectionRequest>) -> impl IntoResponse {
    respond(api::interaction_diagram(&request))
}

async fn concrete_diagram(Json(request): Json<SectionRequest>) -> impl IntoResponse {
    respond(api::concrete_diagram(&request))
}

async fn design(Json(request): Json<SectionRequest>) -> impl IntoResponse {
    respond(api::design(&request))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/diagram", post(diagram))
        .route("/api/v1/concrete-diagram", post(concrete_diagram))
        .route("/api/v1/design", post(design))
        .layer(cors);

    let addr: SocketAddr = std::env::var("RC_SOLVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("RC_SOLVER_ADDR is not a socket address")?;

    info!("RC Section Solver listening on http://{}", addr);
    info!("  Health check:     GET  /health");
    info!("  Diagram:          POST /api/v1/diagram");
    info!("  Concrete diagram: POST /api/v1/concrete-diagram");
    info!("  Design:           POST /api/v1/design");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
