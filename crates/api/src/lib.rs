//! Ticket Triage API Server
//!
//! REST surface over the classification engine and the ticket
//! repository: CRUD, filtered listing, aggregate stats, and the
//! classify endpoint. Oracle instability never surfaces as a 5xx;
//! classify always answers 200 with suggestions or explicit nulls.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use classifier::Classifier;
use storage::Repository;

mod error;
mod rate_limit;
mod routes;
mod settings;

pub use error::ApiError;
pub use rate_limit::RateLimitConfig;
pub use settings::Settings;

/// Application state shared across handlers
pub struct AppState {
    /// Ticket repository
    pub repository: Repository,
    /// Classification engine
    pub classifier: Classifier,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(repository: Repository, classifier: Classifier) -> Self {
        Self {
            repository,
            classifier,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub oracle_configured: bool,
    pub ticket_count: usize,
}

fn base_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/tickets",
            get(routes::tickets::list_tickets).post(routes::tickets::create_ticket),
        )
        .route("/api/tickets/stats", get(routes::stats::get_stats))
        .route(
            "/api/tickets/:id",
            get(routes::tickets::get_ticket).patch(routes::tickets::patch_ticket),
        )
}

/// Create the application router without rate limiting (tests)
pub fn create_router(state: Arc<AppState>) -> Router {
    base_routes()
        .route(
            "/api/tickets/classify",
            post(routes::classify::classify_ticket),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the application router with per-IP rate limiting on the
/// classify route, which may fan out to a paid model call.
///
/// Requires serving via `into_make_service_with_connect_info` so the
/// peer IP extractor has an address to key on.
pub fn create_rate_limited_router(state: Arc<AppState>, rate: &RateLimitConfig) -> Router {
    let classify = Router::new()
        .route(
            "/api/tickets/classify",
            post(routes::classify::classify_ticket),
        )
        .layer(GovernorLayer {
            config: rate_limit::create_governor_config(rate),
        });

    base_routes()
        .merge(classify)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        oracle_configured: state.classifier.has_oracle(),
        ticket_count: state.repository.count()?,
    }))
}

/// Initialize logging
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Run the server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let classifier = settings.build_classifier();
    let rate = RateLimitConfig::for_classifier(classifier.has_oracle());
    let state = Arc::new(AppState::new(Repository::new(), classifier));
    let app = create_rate_limited_router(state, &rate);

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = Arc::new(AppState::new(Repository::new(), Classifier::keyword_only()));
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_rate_limited_router_builds() {
        let state = Arc::new(AppState::new(Repository::new(), Classifier::keyword_only()));
        let _app = create_rate_limited_router(state, &RateLimitConfig::for_classifier(false));
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["oracle_configured"], false);
        assert_eq!(json["ticket_count"], 0);
    }

    #[tokio::test]
    async fn test_create_then_list_tickets() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/tickets",
                r#"{"title": "Login broken", "description": "password reset fails", "category": "account", "priority": "high"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["status"], "open");

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/tickets?category=account&search=login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed["count"], 1);
        assert_eq!(listed["data"][0]["title"], "Login broken");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let response = test_router()
            .oneshot(post_json(
                "/api/tickets",
                r#"{"title": "  ", "description": "something"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_enum_value() {
        let response = test_router()
            .oneshot(
                Request::get("/api/tickets?category=spam")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_ticket_is_404() {
        let response = test_router()
            .oneshot(Request::get("/api/tickets/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_ticket() {
        let router = test_router();
        router
            .clone()
            .oneshot(post_json(
                "/api/tickets",
                r#"{"title": "t", "description": "d"}"#,
            ))
            .await
            .unwrap();

        let request = Request::builder()
            .method("PATCH")
            .uri("/api/tickets/1")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"status": "closed"}"#))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "closed");
        assert_eq!(json["title"], "t");
    }

    #[tokio::test]
    async fn test_classify_endpoint() {
        let response = test_router()
            .oneshot(post_json(
                "/api/tickets/classify",
                r#"{"description": "the platform is down, full outage"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["suggested_category"], "technical");
        assert_eq!(json["suggested_priority"], "critical");
    }

    #[tokio::test]
    async fn test_classify_rejects_blank_description() {
        let response = test_router()
            .oneshot(post_json("/api/tickets/classify", r#"{"description": "  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let router = test_router();
        router
            .clone()
            .oneshot(post_json(
                "/api/tickets",
                r#"{"title": "t", "description": "d", "category": "billing"}"#,
            ))
            .await
            .unwrap();

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/tickets/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["total_tickets"], 1);
        assert_eq!(json["open_tickets"], 1);
        assert_eq!(json["category_breakdown"]["billing"], 1);
        assert_eq!(json["category_breakdown"]["account"], 0);
    }
}
