#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tasklane_api::auth::jwt::{generate_access_token, JwtConfig, TokenSubject};
use tasklane_api::auth::password::hash_password;
use tasklane_api::config::{ServerConfig, WeatherConfig};
use tasklane_api::routes;
use tasklane_api::state::AppState;
use tasklane_api::weather::{WeatherError, WeatherProvider};
use tasklane_db::models::user::{CreateUser, User};
use tasklane_db::repositories::UserRepo;

/// Weather reported by [`FixedWeather::default`].
pub const TEST_WEATHER: &str = "Sunny";

/// Plaintext password given to every user from [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Weather source that always reports the same value.
pub struct FixedWeather(pub String);

impl Default for FixedWeather {
    fn default() -> Self {
        Self(TEST_WEATHER.to_string())
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn today_weather(&self) -> Result<String, WeatherError> {
        Ok(self.0.clone())
    }
}

/// Weather source that always fails, as an unreachable service would.
pub struct UnavailableWeather;

#[async_trait]
impl WeatherProvider for UnavailableWeather {
    async fn today_weather(&self) -> Result<String, WeatherError> {
        Err(WeatherError::Status(503))
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        weather: WeatherConfig {
            url: "http://127.0.0.1:9/weather.json".to_string(),
            timeout: Duration::from_secs(1),
        },
    }
}

/// Build the full application router with a fixed weather source.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_weather(pool, Arc::new(FixedWeather::default()))
}

/// Build the full application router with all middleware layers, mirroring
/// the construction in `main.rs`.
pub fn build_test_app_with_weather(pool: PgPool, weather: Arc<dyn WeatherProvider>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        weather,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with role `USER` and [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, nickname: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        nickname: nickname.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: "USER".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint an access token for `user` signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(
        TokenSubject {
            user_id: user.id,
            email: &user.email,
            nickname: &user.nickname,
            role: &user.role,
        },
        &test_config().jwt,
    )
    .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
