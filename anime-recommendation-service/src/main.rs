use anime_flow::{
    DEFAULT_MODEL, Enricher, GeminiClient, JikanClient, Recommendation, RecommendationPipeline,
    SearchMode,
};
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    pipeline: Arc<RecommendationPipeline>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default)]
    mode: SearchMode,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Initialize structured tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "anime_recommendation_service=debug,anime_flow=debug,tower_http=debug".into()
    });

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add a correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);

    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() {
    init_tracing();

    // The completion service credential is the only required config
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            error!("GEMINI_API_KEY not set");
            std::process::exit(1);
        }
    };
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    info!(%model, "configuring recommendation pipeline");

    let pipeline = Arc::new(RecommendationPipeline::new(
        GeminiClient::new(api_key, model),
        Enricher::new(Arc::new(JikanClient::new())),
    ));

    let app_state = AppState { pipeline };

    // CORS is permissive: the browser front-end is served from elsewhere
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/recommendations", post(search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .layer(from_fn(correlation_id_middleware))
        .with_state(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await.unwrap();
}

async fn health_check() -> &'static str {
    "OK"
}

async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "query must not be empty".to_string(),
            }),
        ));
    }

    info!(
        mode = ?request.mode,
        query_length = request.query.len(),
        "processing recommendation search"
    );

    match state.pipeline.run(&request.query, request.mode).await {
        Ok(recommendations) => {
            info!(count = recommendations.len(), "search completed");
            Ok(Json(SearchResponse { recommendations }))
        }
        Err(e) => {
            // The taxonomy stays in the logs; the client gets one generic
            // message pointing at credentials or connectivity.
            error!(error = %e, "recommendation search failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Could not reach the recommendation oracle. Check your API key or try again."
                        .to_string(),
                }),
            ))
        }
    }
}
