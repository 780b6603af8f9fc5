use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use mongodb::bson::doc;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod api;
mod auth;
mod config;
mod error;
mod handlers;
mod middleware;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();

    let state = AppState::connect(config)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to MongoDB: {}", e));
    tracing::info!(
        "connected to MongoDB (databases: {}, {})",
        config.database.food_db,
        config.database.purchase_db
    );

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("food is waiting at {}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    // One fixed origin, credentials on, so the browser sends the auth cookie
    let origin = config::config()
        .security
        .cors_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173"));

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(food_routes())
        .merge(purchase_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new().route("/jwt", post(auth::issue))
}

fn food_routes() -> Router<AppState> {
    use handlers::foods;

    Router::new()
        .route("/foods", get(foods::list).post(foods::create))
        .route(
            "/foods/:id",
            get(foods::get).put(foods::update).delete(foods::delete),
        )
        .merge(
            // Guarded: only /myFoods sits behind the token gate
            Router::new()
                .route("/myFoods", get(foods::mine))
                .route_layer(from_fn(middleware::verify_token)),
        )
}

fn purchase_routes() -> Router<AppState> {
    use handlers::purchases;

    Router::new()
        .route("/purchase", get(purchases::list).post(purchases::create))
        .route("/purchase/:id", delete(purchases::delete))
}

async fn root() -> &'static str {
    "food is falling from the sky"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state
        .client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database_error": e.to_string() })),
        ),
    }
}
