use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the mock resolver sends back for one request.
#[derive(Debug, Clone)]
pub struct MockAnswer {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl MockAnswer {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Vec<u8>,
}

type Handler = Arc<dyn Fn(&[u8]) -> MockAnswer + Send + Sync>;

#[derive(Clone)]
struct MockState {
    handler: Handler,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// RFC 8484 endpoint on an ephemeral localhost port.
pub struct MockDohServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&[u8]) -> MockAnswer + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            handler: Arc::new(handler),
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/dns-query", post(handle_query))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Always answers with `body`.
    pub async fn fixed(body: Vec<u8>) -> Self {
        Self::start(move |_| MockAnswer::ok(body.clone())).await
    }

    /// Answers every query with a matching DNS response.
    pub async fn echo() -> Self {
        Self::start(|query| MockAnswer::ok(super::dns_response_for(query))).await
    }

    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_query(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        content_type: header_value(header::CONTENT_TYPE),
        accept: header_value(header::ACCEPT),
        body: body.to_vec(),
    });

    let answer = (state.handler)(&body);
    if !answer.delay.is_zero() {
        tokio::time::sleep(answer.delay).await;
    }

    (
        answer.status,
        [(header::CONTENT_TYPE, "application/dns-message")],
        answer.body,
    )
        .into_response()
}
