//! Client for the external recommendation service.
//!
//! This module provides:
//!
//! - `RecommendationService`: the narrow seam the request controller talks to
//! - `HttpRecommendationClient`: reqwest implementation of `POST /recommend`
//! - `GameRecommendation`: deserialized game records, kept in server order
//! - `RecommendError`: what went wrong, logged but never shown to the user
//!
//! The service is a black box. It takes `{query, tone}` and answers with
//! `{"recommendations": [...]}`, or `{"error": "..."}` with a non-2xx status.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ServiceConfig;
use crate::tone::Tone;

/// User agent for service requests
const USER_AGENT: &str = concat!("Insight-Client/", env!("CARGO_PKG_VERSION"));

/// Path of the recommendation endpoint, relative to the configured base URL
const RECOMMEND_PATH: &str = "/recommend";

/// Query and tone as typed by the user. Doubles as the request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub query: String,
    pub tone: Tone,
}

/// A single recommended game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecommendation {
    pub title: String,
    pub header_image: String,
    #[serde(deserialize_with = "display_text")]
    pub release_date: String,
    #[serde(deserialize_with = "display_text")]
    pub price: String,
    pub developer: String,
    pub description: String,
    /// Trailer link. The service sends `""` when there is none.
    #[serde(default, deserialize_with = "non_empty_link")]
    pub videos: Option<String>,
    #[serde(default, deserialize_with = "link_list")]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub genres: Option<String>,
}

impl GameRecommendation {
    /// External link for the "View Movie" affordance
    pub fn header_image_link(&self) -> Option<&str> {
        Some(self.header_image.trim()).filter(|uri| !uri.is_empty())
    }

    pub fn video_link(&self) -> Option<&str> {
        self.videos.as_deref()
    }

    /// External link for the "View Screenshot" affordance (first screenshot)
    pub fn screenshot_link(&self) -> Option<&str> {
        self.screenshots.first().map(String::as_str)
    }
}

/// Body of a successful response
#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    recommendations: Vec<GameRecommendation>,
}

/// Body the service sends alongside 4xx/5xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
    Null,
}

/// Prices and dates come through as JSON numbers or strings, sometimes null
fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
        TextOrNumber::Null => String::new(),
    })
}

fn non_empty_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let link = Option::<String>::deserialize(deserializer)?;
    Ok(link.filter(|l| !l.trim().is_empty()))
}

fn link_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let links = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(links.into_iter().filter(|l| !l.trim().is_empty()).collect())
}

/// Failure detail for a recommendation request.
///
/// The controller collapses every variant into one "request failed" state;
/// the detail only reaches the log.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("could not reach recommendation service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("recommendation service returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("malformed recommendation response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Anything that can turn a query into an ordered list of games
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn fetch_recommendations(
        &self,
        query: &QueryState,
    ) -> Result<Vec<GameRecommendation>, RecommendError>;
}

/// HTTP client for `POST {base_url}/recommend`
#[derive(Clone)]
pub struct HttpRecommendationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecommendationClient {
    /// Create a client from service settings
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_client(builder.build()?, &config.base_url))
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the recommendation endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, RECOMMEND_PATH)
    }
}

#[async_trait]
impl RecommendationService for HttpRecommendationClient {
    async fn fetch_recommendations(
        &self,
        query: &QueryState,
    ) -> Result<Vec<GameRecommendation>, RecommendError> {
        let start = std::time::Instant::now();

        let response = self.client.post(self.endpoint()).json(query).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(RecommendError::Status { status, message });
        }

        let parsed: RecommendationResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            "Received {} recommendations in {:.1}s",
            parsed.recommendations.len(),
            start.elapsed().as_secs_f32()
        );

        Ok(parsed.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tokio::sync::{Mutex, oneshot};

    #[derive(Clone)]
    struct ServerState {
        status: StatusCode,
        body: String,
        payload_tx: Arc<Mutex<Option<oneshot::Sender<Value>>>>,
    }

    async fn handle_recommend(
        State(state): State<ServerState>,
        Json(payload): Json<Value>,
    ) -> (StatusCode, String) {
        if let Some(tx) = state.payload_tx.lock().await.take() {
            let _ = tx.send(payload);
        }
        (state.status, state.body.clone())
    }

    /// Serve a canned response on an ephemeral port
    async fn spawn_service(status: StatusCode, body: String) -> (String, oneshot::Receiver<Value>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let state = ServerState {
            status,
            body,
            payload_tx: Arc::new(Mutex::new(Some(tx))),
        };
        let app = Router::new()
            .route("/recommend", post(handle_recommend))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}/"), rx)
    }

    fn client_for(base_url: &str) -> HttpRecommendationClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpRecommendationClient::with_client(client, base_url)
    }

    fn game_json(title: &str) -> Value {
        json!({
            "title": title,
            "header_image": format!("https://img.example/{title}.jpg&fife=w800"),
            "release_date": "Oct 21, 2008",
            "price": 9.99,
            "developer": "Valve and Turtle Rock Studios",
            "description": "Survive the horde...",
            "genres": "Action",
            "screenshots": ["https://img.example/s1.jpg", "https://img.example/s2.jpg"],
            "videos": ""
        })
    }

    #[test]
    fn test_deserialize_record_normalizes_fields() {
        let game: GameRecommendation = serde_json::from_value(game_json("Left 4 Dead")).unwrap();
        assert_eq!(game.price, "9.99");
        assert_eq!(game.videos, None);
        assert_eq!(game.screenshot_link(), Some("https://img.example/s1.jpg"));
        assert_eq!(game.genres.as_deref(), Some("Action"));
    }

    #[test]
    fn test_deserialize_record_optional_fields_missing() {
        let game: GameRecommendation = serde_json::from_value(json!({
            "title": "Portal",
            "header_image": "portal.jpg",
            "release_date": "2007",
            "price": "Free",
            "developer": "Valve",
            "description": "...",
            "videos": "https://video.example/portal.webm",
            "screenshots": null
        }))
        .unwrap();
        assert_eq!(game.video_link(), Some("https://video.example/portal.webm"));
        assert!(game.screenshots.is_empty());
        assert_eq!(game.screenshot_link(), None);
    }

    #[test]
    fn test_null_text_field_does_not_reject_response() {
        let mut broken = game_json("Braid");
        broken["release_date"] = Value::Null;
        broken["price"] = Value::Null;

        let response: RecommendationResponse = serde_json::from_value(json!({
            "recommendations": [game_json("Left 4 Dead"), broken]
        }))
        .unwrap();

        let games = response.recommendations;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].price, "9.99");
        assert_eq!(games[1].title, "Braid");
        assert_eq!(games[1].release_date, "");
        assert_eq!(games[1].price, "");
    }

    #[test]
    fn test_header_image_link_skips_blank() {
        let mut game: GameRecommendation = serde_json::from_value(game_json("Celeste")).unwrap();
        game.header_image = "  https://img.example/celeste.jpg ".to_string();
        assert_eq!(game.header_image_link(), Some("https://img.example/celeste.jpg"));

        game.header_image = "   ".to_string();
        assert_eq!(game.header_image_link(), None);
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = client_for("http://localhost:5000/");
        assert_eq!(client.endpoint(), "http://localhost:5000/recommend");
    }

    #[tokio::test]
    async fn test_fetch_sends_payload_and_keeps_order() {
        let body = json!({
            "recommendations": [game_json("A"), game_json("B"), game_json("C")]
        });
        let (base_url, payload_rx) = spawn_service(StatusCode::OK, body.to_string()).await;

        let query = QueryState {
            query: "zombies".to_string(),
            tone: Tone::Suspenseful,
        };
        let games = client_for(&base_url).fetch_recommendations(&query).await.unwrap();

        let titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        let payload = payload_rx.await.unwrap();
        assert_eq!(payload, json!({"query": "zombies", "tone": "suspenseful"}));
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let body = json!({"error": "Missing query"}).to_string();
        let (base_url, _rx) = spawn_service(StatusCode::BAD_REQUEST, body).await;

        let err = client_for(&base_url)
            .fetch_recommendations(&QueryState::default())
            .await
            .unwrap_err();

        match err {
            RecommendError::Status { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Missing query");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_rejects_body_without_recommendations() {
        let (base_url, _rx) = spawn_service(StatusCode::OK, "{\"games\": []}".to_string()).await;

        let err = client_for(&base_url)
            .fetch_recommendations(&QueryState::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_unreachable_service() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .fetch_recommendations(&QueryState::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::Network(_)));
    }
}
