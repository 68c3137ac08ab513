use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use super::{
    BoxFuture, Credentials, ExotelClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    RequestBody,
};

#[derive(Debug, Clone, PartialEq)]
pub(super) struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: RequestBody,
    pub api_key: String,
    pub api_token: String,
}

impl RecordedRequest {
    pub fn json(&self) -> &serde_json::Value {
        match &self.body {
            RequestBody::Json(value) => value,
            other => panic!("expected a JSON body, got {other:?}"),
        }
    }
}

enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Default)]
struct FakeState {
    requests: Vec<RecordedRequest>,
    replies: VecDeque<Reply>,
}

/// Records every request and answers with queued replies, in order.
#[derive(Clone, Default)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Response(HttpResponse {
                status,
                body: body.to_owned(),
            }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Failure(message.to_owned()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn paths(&self) -> Vec<(HttpMethod, String)> {
        self.requests()
            .into_iter()
            .map(|request| {
                let path = request
                    .url
                    .strip_prefix("https://api.example.invalid")
                    .unwrap_or(&request.url)
                    .to_owned();
                (request.method, path)
            })
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
        credentials: &'a Credentials,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(RecordedRequest {
                method: request.method,
                url: request.url.to_string(),
                body: request.body,
                api_key: credentials.api_key().as_str().to_owned(),
                api_token: credentials.api_token().as_str().to_owned(),
            });
            match state.replies.pop_front() {
                Some(Reply::Response(response)) => Ok(response),
                Some(Reply::Failure(message)) => Err(message.into()),
                None => Ok(HttpResponse {
                    status: 500,
                    body: "no fake reply queued".to_owned(),
                }),
            }
        })
    }
}

pub(super) fn client_with(transport: FakeTransport) -> ExotelClient {
    ExotelClient {
        credentials: Credentials::new("acme1", "key", "token").unwrap(),
        base_url: "https://api.example.invalid".to_owned(),
        http: Arc::new(transport),
    }
}

/// A v2 batch envelope where every item succeeded with the given sids.
pub(super) fn batch_success(sids: &[&str]) -> String {
    let items = sids
        .iter()
        .map(|sid| serde_json::json!({ "code": 200, "status": "success", "data": { "sid": sid } }))
        .collect::<Vec<_>>();
    serde_json::json!({
        "response": items,
        "metadata": { "total": sids.len(), "success": sids.len(), "failed": 0 }
    })
    .to_string()
}
