use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use exotel::{
    AppId, BulkSmsOptions, CallerId, CampaignOptions, CampaignSource, CreateCampaign, Credentials,
    E164Number, ExotelClient, ExotelError, ListId, MessageText, SendBulkSms, SenderId,
};
use serde_json::{Value as JsonValue, json};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: String,
}

impl MockResponse {
    fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

async fn record_handler(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    state
        .requests
        .lock()
        .expect("request log mutex must not be poisoned")
        .push(Recorded {
            method,
            path: uri
                .path_and_query()
                .map(|pq| pq.as_str().to_owned())
                .unwrap_or_default(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        });

    let response = state
        .responses
        .lock()
        .expect("response queue mutex must not be poisoned")
        .pop_front()
        .unwrap_or_else(|| {
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "no mock response available"}),
            )
        });

    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
}

struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    fn requests(&self) -> Vec<Recorded> {
        self.requests
            .lock()
            .expect("request log mutex must not be poisoned")
            .clone()
    }

    fn client(&self) -> ExotelClient {
        self.client_at(&self.base_url)
    }

    fn client_at(&self, base_url: &str) -> ExotelClient {
        ExotelClient::builder(credentials())
            .base_url(base_url)
            .build()
            .expect("client must build")
    }
}

async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .fallback(record_handler)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        requests: state.requests,
        task,
    }
}

fn credentials() -> Credentials {
    Credentials::new("acme1", "key", "token").expect("credentials must be valid")
}

fn campaign_request() -> CreateCampaign {
    CreateCampaign::new(
        CallerId::new("08047091234").expect("caller id"),
        AppId::new("2345").expect("app id"),
        CampaignSource::Numbers(vec![E164Number::new("+919876543210").expect("number")]),
        CampaignOptions::default(),
    )
    .expect("campaign request must be valid")
}

#[tokio::test]
async fn create_campaign_sends_basic_auth_and_json() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"response": [{"code": 200, "data": {"id": "camp-1"}}]}),
    )])
    .await;

    let value = server
        .client()
        .create_campaign(&campaign_request())
        .await
        .expect("campaign must be created");
    assert_eq!(value["response"][0]["data"]["id"], "camp-1");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/v2/accounts/acme1/campaigns");
    assert_eq!(request.authorization.as_deref(), Some("Basic a2V5OnRva2Vu"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));

    let body: JsonValue = serde_json::from_str(&request.body).expect("body must be JSON");
    assert_eq!(body["campaigns"][0]["caller_id"], "08047091234");
    assert_eq!(body["campaigns"][0]["from"], json!(["+919876543210"]));
}

#[tokio::test]
async fn error_statuses_map_to_typed_errors() {
    let statuses = [
        StatusCode::BAD_REQUEST,
        StatusCode::UNAUTHORIZED,
        StatusCode::PAYMENT_REQUIRED,
        StatusCode::FORBIDDEN,
        StatusCode::NOT_FOUND,
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::SERVICE_UNAVAILABLE,
    ];
    let responses = statuses
        .iter()
        .map(|status| {
            MockResponse::json(
                *status,
                json!({"response": {"code": status.as_u16(), "error_data": {"description": "described"}}}),
            )
        })
        .collect();
    let server = spawn_server(responses).await;
    let client = server.client();

    for status in statuses {
        let err = client
            .get_list_details(&ListId::new("l-1").expect("list id"))
            .await
            .expect_err("request must fail");
        assert_eq!(err.status(), Some(status.as_u16()));

        let matched = match status.as_u16() {
            400 => matches!(err, ExotelError::Validation { .. }),
            401 => matches!(err, ExotelError::AuthenticationFailed { .. }),
            402 => matches!(err, ExotelError::PaymentRequired { .. }),
            403 => matches!(err, ExotelError::PermissionDenied { .. }),
            404 => matches!(err, ExotelError::NotFound { .. }),
            429 => matches!(err, ExotelError::Throttled { .. }),
            _ => matches!(err, ExotelError::HttpStatus { body: Some(_), .. }),
        };
        assert!(matched, "{status} mapped to {err:?}");
        if status != StatusCode::SERVICE_UNAVAILABLE {
            assert_eq!(err.description(), Some("described"));
        }
    }
}

#[tokio::test]
async fn bulk_sms_is_form_encoded() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!([{"SMSMessage": {"Sid": "s-1"}}, {"SMSMessage": {"Sid": "s-2"}}]),
    )])
    .await;

    let request = SendBulkSms::new(
        SenderId::new("EXOTL").expect("sender"),
        vec![
            E164Number::new("+919876543210").expect("number"),
            E164Number::new("+919876543211").expect("number"),
        ],
        MessageText::new("hello world").expect("text"),
        BulkSmsOptions::default(),
    )
    .expect("bulk request must be valid");

    let value = server
        .client()
        .send_bulk_sms(&request)
        .await
        .expect("sms must be sent");
    assert_eq!(value[1]["SMSMessage"]["Sid"], "s-2");

    let requests = server.requests();
    assert_eq!(requests[0].path, "/v1/Accounts/acme1/Sms/send.json");
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        requests[0].body,
        "From=EXOTL&To=%2B919876543210&To=%2B919876543211&Body=hello+world"
    );
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = spawn_server(vec![MockResponse::json(StatusCode::OK, json!({}))]).await;
    let client = server.client_at(&format!("{}/proxy/", server.base_url));

    client
        .delete_list(&ListId::new("l-1").expect("list id"))
        .await
        .expect("delete must succeed");

    let requests = server.requests();
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path, "/proxy/v2/accounts/acme1/lists/l-1");
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    drop(listener);

    let client = ExotelClient::builder(credentials())
        .base_url(format!("http://{address}"))
        .build()
        .expect("client must build");
    let err = client
        .get_all_exophones()
        .await
        .expect_err("request must fail");
    assert!(matches!(err, ExotelError::Transport(_)), "{err:?}");
}
