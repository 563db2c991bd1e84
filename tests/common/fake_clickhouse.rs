//! Fake ClickHouse HTTP interface for integration tests.
//!
//! Spins up a minimal `axum` server on a random TCP port bound to 127.0.0.1.
//! `POST /` records the URL parameters, the credential headers and the
//! statement body, then answers with the next queued response. When the queue
//! is empty it answers `200` with an empty body.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = FakeClickHouse::start().await.unwrap();
//! server.respond(200, r#"{"id":1,...}"#).await;
//! let store = ClickHouseStore::new(server.options("vacancies")).unwrap();
//! ```

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use vacancy_clickhouse::ClickHouseOptions;

/// One request as the server received it.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub params: HashMap<String, String>,
    pub user: Option<String>,
    pub key: Option<String>,
    pub statement: String,
}

#[derive(Default)]
struct ServerState {
    responses: VecDeque<(u16, String)>,
    received: Vec<ReceivedRequest>,
}

/// Handle to the running fake server.
pub struct FakeClickHouse {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeClickHouse {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/", post(execute))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Store options pointing at this server.
    pub fn options(&self, table: &str) -> ClickHouseOptions {
        ClickHouseOptions {
            url: self.base_url(),
            database: "jobs".to_string(),
            user: "reader".to_string(),
            password: "s3cret".to_string(),
            table: table.to_string(),
        }
    }

    /// Queue the response for the next request.
    pub async fn respond(&self, status: u16, body: impl Into<String>) {
        self.state
            .lock()
            .await
            .responses
            .push_back((status, body.into()));
    }

    pub async fn received(&self) -> Vec<ReceivedRequest> {
        self.state.lock().await.received.clone()
    }
}

async fn execute(
    State(state): State<Arc<Mutex<ServerState>>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    statement: String,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut state = state.lock().await;
    state.received.push(ReceivedRequest {
        params,
        user: header("x-clickhouse-user"),
        key: header("x-clickhouse-key"),
        statement,
    });
    let (status, body) = state
        .responses
        .pop_front()
        .unwrap_or((200, String::new()));
    (StatusCode::from_u16(status).unwrap(), body)
}

/// One `JSONEachRow` line in the shape `SELECT … toString(published_at)` emits.
pub fn row_json(id: i32, city: &str, name: &str, published_at: &str) -> String {
    serde_json::json!({
        "id": id,
        "city": city,
        "name": name,
        "required_experience": "От 3 до 6 лет",
        "description": "",
        "salary_from": 0,
        "salary_to": 0,
        "published_at": published_at,
        "status": "open",
        "skills": "java",
    })
    .to_string()
}
