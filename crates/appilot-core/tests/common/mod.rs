//! Shared test helpers for appilot-core integration tests.
//!
//! Provides a scripted mock Appium server speaking the W3C WebDriver wire
//! format over HTTP. Tests declare which elements exist (and how they
//! behave), start the server on an ephemeral port, and drive the real
//! `RemoteDriver` against it. Every request is recorded so tests can assert
//! on the exact command traffic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;
use base64::Engine;
use serde_json::{json, Value};

use appilot_core::wire::ELEMENT_KEY;

/// Minimal valid PNG header, enough for screenshot payloads.
pub const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub const MOCK_SESSION_ID: &str = "mock-session-1";

/// One scripted element on the mock server.
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Element id handed out by find-element.
    pub id: String,
    /// The `using` strategy this element answers to.
    pub using: String,
    /// The selector this element answers to.
    pub selector: String,
    pub text: String,
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
    /// Number of find requests for this selector before the element starts
    /// to be reported. Models elements that appear after a delay.
    pub appear_after_finds: u32,
    /// When set, clicks on this element fail with `element not interactable`.
    pub fail_click: bool,
}

impl MockElement {
    pub fn new(name: &str, using: &str, selector: &str) -> Self {
        Self {
            id: format!("el-{name}"),
            using: using.to_string(),
            selector: selector.to_string(),
            text: String::new(),
            displayed: true,
            enabled: true,
            selected: false,
            appear_after_finds: 0,
            fail_click: false,
        }
    }

    pub fn accessibility_id(name: &str, selector: &str) -> Self {
        Self::new(name, "accessibility id", selector)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn appears_after(mut self, finds: u32) -> Self {
        self.appear_after_finds = finds;
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub method: String,
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
pub struct MockState {
    pub elements: Vec<MockElement>,
    pub requests: Vec<RequestRecord>,
    pub find_counts: HashMap<String, u32>,
    /// When set, DELETE /session responds with an internal error.
    pub fail_delete: bool,
    /// When set, POST /session responds with `session not created`.
    pub reject_session: bool,
    pub session_deleted: bool,
}

impl MockState {
    fn record(&mut self, method: &str, path: &str, body: Value) {
        self.requests.push(RequestRecord {
            method: method.to_string(),
            path: path.to_string(),
            body,
        });
    }
}

pub type Shared = Arc<Mutex<MockState>>;

fn ok(value: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "value": value })))
}

fn wd_error(status: StatusCode, error: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "value": { "error": error, "message": message, "stacktrace": "" }
        })),
    )
}

fn no_such_element() -> (StatusCode, Json<Value>) {
    wd_error(
        StatusCode::NOT_FOUND,
        "no such element",
        "An element could not be located on the page",
    )
}

/// The mock Appium server plus a handle to its scripted state.
pub struct MockServer {
    pub state: Shared,
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    /// Start a server exposing the given elements on an ephemeral port.
    pub async fn start(elements: Vec<MockElement>) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            elements,
            ..MockState::default()
        }));

        let app = Router::new()
            .route("/session", post(new_session))
            .route("/session/:sid", delete(delete_session))
            .route("/session/:sid/timeouts", post(set_timeouts))
            .route("/session/:sid/element", post(find_element))
            .route("/session/:sid/elements", post(find_elements))
            .route("/session/:sid/element/:eid/click", post(click_element))
            .route("/session/:sid/element/:eid/clear", post(clear_element))
            .route("/session/:sid/element/:eid/value", post(element_value))
            .route("/session/:sid/element/:eid/text", get(element_text))
            .route(
                "/session/:sid/element/:eid/attribute/:name",
                get(element_attribute),
            )
            .route("/session/:sid/element/:eid/displayed", get(element_displayed))
            .route("/session/:sid/element/:eid/enabled", get(element_enabled))
            .route("/session/:sid/element/:eid/selected", get(element_selected))
            .route("/session/:sid/element/:eid/rect", get(element_rect))
            .route("/session/:sid/window/rect", get(window_rect))
            .route("/session/:sid/screenshot", get(screenshot))
            .route("/session/:sid/actions", post(perform_actions))
            .route("/session/:sid/execute/sync", post(execute_script))
            .route(
                "/session/:sid/appium/device/hide_keyboard",
                post(hide_keyboard),
            )
            .route("/session/:sid/back", post(back))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RequestRecord> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of recorded requests whose path contains `fragment`.
    pub fn requests_matching(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path.contains(fragment))
            .count()
    }

    /// Number of recorded requests whose JSON body contains `fragment`.
    pub fn bodies_matching(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.body.to_string().contains(fragment))
            .count()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn new_session(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record("POST", "/session", body);
    if st.reject_session {
        return wd_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "session not created",
            "A new session could not be created",
        );
    }
    ok(json!({
        "sessionId": MOCK_SESSION_ID,
        "capabilities": {},
    }))
}

async fn delete_session(
    State(state): State<Shared>,
    Path(sid): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record("DELETE", &format!("/session/{sid}"), Value::Null);
    if st.fail_delete {
        return wd_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unknown error",
            "session teardown exploded",
        );
    }
    st.session_deleted = true;
    ok(Value::Null)
}

async fn set_timeouts(
    State(state): State<Shared>,
    Path(sid): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record("POST", &format!("/session/{sid}/timeouts"), body);
    ok(Value::Null)
}

async fn find_element(
    State(state): State<Shared>,
    Path(sid): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record("POST", &format!("/session/{sid}/element"), body.clone());

    let using = body["using"].as_str().unwrap_or_default().to_string();
    let selector = body["value"].as_str().unwrap_or_default().to_string();
    let key = format!("{using}|{selector}");
    let seen = {
        let count = st.find_counts.entry(key).or_insert(0);
        *count += 1;
        *count
    };

    match st
        .elements
        .iter()
        .find(|el| el.using == using && el.selector == selector && seen > el.appear_after_finds)
    {
        Some(el) => ok(json!({ ELEMENT_KEY: el.id })),
        None => no_such_element(),
    }
}

async fn find_elements(
    State(state): State<Shared>,
    Path(sid): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record("POST", &format!("/session/{sid}/elements"), body.clone());

    let using = body["using"].as_str().unwrap_or_default();
    let selector = body["value"].as_str().unwrap_or_default();
    let matches: Vec<Value> = st
        .elements
        .iter()
        .filter(|el| el.using == using && el.selector == selector)
        .map(|el| json!({ ELEMENT_KEY: el.id }))
        .collect();
    ok(Value::Array(matches))
}

fn with_element<F>(state: &Shared, eid: &str, f: F) -> (StatusCode, Json<Value>)
where
    F: FnOnce(&MockElement) -> (StatusCode, Json<Value>),
{
    let st = state.lock().unwrap();
    match st.elements.iter().find(|el| el.id == eid) {
        Some(el) => f(el),
        None => wd_error(
            StatusCode::NOT_FOUND,
            "stale element reference",
            "element is not attached to the page",
        ),
    }
}

async fn click_element(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "POST",
        &format!("/session/{sid}/element/{eid}/click"),
        Value::Null,
    );
    with_element(&state, &eid, |el| {
        if el.fail_click {
            wd_error(
                StatusCode::BAD_REQUEST,
                "element not interactable",
                "element is obscured",
            )
        } else {
            ok(Value::Null)
        }
    })
}

async fn clear_element(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record(
        "POST",
        &format!("/session/{sid}/element/{eid}/clear"),
        Value::Null,
    );
    if let Some(el) = st.elements.iter_mut().find(|el| el.id == eid) {
        el.text.clear();
    }
    ok(Value::Null)
}

async fn element_value(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut st = state.lock().unwrap();
    st.record(
        "POST",
        &format!("/session/{sid}/element/{eid}/value"),
        body.clone(),
    );
    let typed = body["text"].as_str().unwrap_or_default().to_string();
    if let Some(el) = st.elements.iter_mut().find(|el| el.id == eid) {
        el.text.push_str(&typed);
    }
    ok(Value::Null)
}

async fn element_text(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/element/{eid}/text"),
        Value::Null,
    );
    with_element(&state, &eid, |el| ok(json!(el.text)))
}

async fn element_attribute(
    State(state): State<Shared>,
    Path((sid, eid, name)): Path<(String, String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/element/{eid}/attribute/{name}"),
        Value::Null,
    );
    with_element(&state, &eid, |el| match name.as_str() {
        "content-desc" => ok(json!(el.selector)),
        "text" => ok(json!(el.text)),
        _ => ok(Value::Null),
    })
}

async fn element_displayed(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/element/{eid}/displayed"),
        Value::Null,
    );
    with_element(&state, &eid, |el| ok(json!(el.displayed)))
}

async fn element_enabled(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/element/{eid}/enabled"),
        Value::Null,
    );
    with_element(&state, &eid, |el| ok(json!(el.enabled)))
}

async fn element_selected(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/element/{eid}/selected"),
        Value::Null,
    );
    with_element(&state, &eid, |el| ok(json!(el.selected)))
}

async fn element_rect(
    State(state): State<Shared>,
    Path((sid, eid)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/element/{eid}/rect"),
        Value::Null,
    );
    with_element(&state, &eid, |_| {
        ok(json!({ "x": 40.0, "y": 200.0, "width": 120.0, "height": 44.0 }))
    })
}

async fn window_rect(
    State(state): State<Shared>,
    Path(sid): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/window/rect"),
        Value::Null,
    );
    ok(json!({ "x": 0.0, "y": 0.0, "width": 390.0, "height": 844.0 }))
}

async fn screenshot(
    State(state): State<Shared>,
    Path(sid): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "GET",
        &format!("/session/{sid}/screenshot"),
        Value::Null,
    );
    let encoded = base64::engine::general_purpose::STANDARD.encode(PNG_MAGIC);
    ok(json!(encoded))
}

async fn perform_actions(
    State(state): State<Shared>,
    Path(sid): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .lock()
        .unwrap()
        .record("POST", &format!("/session/{sid}/actions"), body);
    ok(Value::Null)
}

async fn execute_script(
    State(state): State<Shared>,
    Path(sid): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .lock()
        .unwrap()
        .record("POST", &format!("/session/{sid}/execute/sync"), body);
    ok(Value::Null)
}

async fn hide_keyboard(
    State(state): State<Shared>,
    Path(sid): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().record(
        "POST",
        &format!("/session/{sid}/appium/device/hide_keyboard"),
        Value::Null,
    );
    ok(json!(true))
}

async fn back(State(state): State<Shared>, Path(sid): Path<String>) -> (StatusCode, Json<Value>) {
    state
        .lock()
        .unwrap()
        .record("POST", &format!("/session/{sid}/back"), Value::Null);
    ok(Value::Null)
}

// ---------------------------------------------------------------------------
// Driver / action layer helpers
// ---------------------------------------------------------------------------

use std::time::Duration;

use appilot_core::actions::MobileActions;
use appilot_core::config::{Config, Platform};
use appilot_core::remote::RemoteDriver;

/// Short explicit wait used by tests: a couple of poll intervals.
pub const TEST_WAIT: Duration = Duration::from_millis(600);

/// Build a `Config` pointing at the mock server.
pub fn mock_config(server: &MockServer, platform: &str) -> Config {
    let url = server.base_url.clone();
    let platform = platform.to_string();
    Config::from_lookup(|var| match var {
        "APPIUM_SERVER_URL" => Some(url.clone()),
        "PLATFORM" => Some(platform.clone()),
        "IMPLICIT_WAIT" => Some("0".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Open a real `RemoteDriver` session against the mock server.
pub async fn connected_driver(server: &MockServer) -> RemoteDriver {
    let config = mock_config(server, "android");
    let caps = appilot_core::capabilities::for_platform(&config);
    RemoteDriver::open(config.server_url(), &caps, Duration::from_secs(5))
        .await
        .expect("mock session should open")
}

/// A `MobileActions` layer for the given platform, wired to the mock server,
/// with a short explicit wait and screenshots in a temp directory.
pub async fn actions_for(
    server: &MockServer,
    platform: Platform,
    screenshots_dir: &std::path::Path,
) -> MobileActions {
    let driver = connected_driver(server).await;
    MobileActions::new(Arc::new(driver), platform, TEST_WAIT, screenshots_dir)
}
