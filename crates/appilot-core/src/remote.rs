//! Remote driver implementation over the Appium/WebDriver HTTP protocol.
//!
//! [`RemoteDriver`] owns one live session on a remote automation server. It
//! is created through [`open`](RemoteDriver::open) (which negotiates
//! capabilities) and implements [`MobileDriver`] by translating each command
//! into the corresponding WebDriver endpoint.
//!
//! The session is never shared across tests and never pooled; each test
//! opens its own session and closes it at the end (see [`crate::session`]).

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};
use tracing::{debug, trace};
use url::Url;

use crate::driver::{DriverError, MobileDriver};
use crate::element::{ElementId, Rect};
use crate::locator::Locator;
use crate::wire::{self, WireError};

/// A live WebDriver session on a remote automation server.
#[derive(Debug)]
pub struct RemoteDriver {
    http: reqwest::Client,
    /// Server URL without a trailing slash.
    base: String,
    session: String,
}

impl RemoteDriver {
    /// Open a new session by negotiating capabilities with the server.
    ///
    /// Connection or capability failures are returned as-is: a dead or
    /// misconfigured server justifies aborting the whole run, so there is no
    /// retry here.
    pub async fn open(
        server_url: &Url,
        capabilities: &serde_json::Map<String, Value>,
        command_timeout: Duration,
    ) -> Result<Self, DriverError> {
        let http = reqwest::Client::builder()
            .timeout(command_timeout)
            .build()
            .map_err(WireError::from)?;
        let base = server_url.as_str().trim_end_matches('/').to_string();

        let payload = json!({
            "capabilities": {
                "alwaysMatch": capabilities,
                "firstMatch": [{}],
            }
        });

        debug!(server = %base, "opening session");
        let value = wire::post(&http, &format!("{base}/session"), &payload).await?;
        let session = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or(WireError::MissingField("sessionId"))?
            .to_string();
        debug!(session = %session, "session opened");

        Ok(Self {
            http,
            base,
            session,
        })
    }

    /// Apply the server-side implicit wait for element lookups.
    pub async fn set_implicit_wait(&self, wait: Duration) -> Result<(), DriverError> {
        let body = json!({ "implicit": wait.as_millis() as u64 });
        wire::post(&self.http, &self.url("timeouts"), &body).await?;
        Ok(())
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/session/{}/{}", self.base, self.session, tail)
    }

    async fn post(&self, tail: &str, body: Value) -> Result<Value, DriverError> {
        trace!(command = tail, "webdriver post");
        Ok(wire::post(&self.http, &self.url(tail), &body).await?)
    }

    async fn get(&self, tail: &str) -> Result<Value, DriverError> {
        trace!(command = tail, "webdriver get");
        Ok(wire::get(&self.http, &self.url(tail)).await?)
    }
}

#[async_trait]
impl MobileDriver for RemoteDriver {
    fn session_id(&self) -> &str {
        &self.session
    }

    async fn find_element(&self, locator: &Locator) -> Result<ElementId, DriverError> {
        let body = json!({
            "using": locator.strategy.as_wire(),
            "value": locator.selector,
        });
        let value = self.post("element", body).await?;
        Ok(wire::element_id(&value)?)
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        let body = json!({
            "using": locator.strategy.as_wire(),
            "value": locator.selector,
        });
        let value = self.post("elements", body).await?;
        Ok(wire::element_ids(&value)?)
    }

    async fn click(&self, element: &ElementId) -> Result<(), DriverError> {
        self.post(&format!("element/{element}/click"), json!({}))
            .await?;
        Ok(())
    }

    async fn clear(&self, element: &ElementId) -> Result<(), DriverError> {
        self.post(&format!("element/{element}/clear"), json!({}))
            .await?;
        Ok(())
    }

    async fn send_keys(&self, element: &ElementId, text: &str) -> Result<(), DriverError> {
        self.post(
            &format!("element/{element}/value"),
            json!({ "text": text }),
        )
        .await?;
        Ok(())
    }

    async fn text(&self, element: &ElementId) -> Result<String, DriverError> {
        let value = self.get(&format!("element/{element}/text")).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(
        &self,
        element: &ElementId,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let value = self
            .get(&format!("element/{element}/attribute/{name}"))
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn is_displayed(&self, element: &ElementId) -> Result<bool, DriverError> {
        let value = self.get(&format!("element/{element}/displayed")).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_enabled(&self, element: &ElementId) -> Result<bool, DriverError> {
        let value = self.get(&format!("element/{element}/enabled")).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_selected(&self, element: &ElementId) -> Result<bool, DriverError> {
        let value = self.get(&format!("element/{element}/selected")).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn rect(&self, element: &ElementId) -> Result<Rect, DriverError> {
        let value = self.get(&format!("element/{element}/rect")).await?;
        let rect = serde_json::from_value(value).map_err(WireError::from)?;
        Ok(rect)
    }

    async fn window_rect(&self) -> Result<Rect, DriverError> {
        let value = self.get("window/rect").await?;
        let rect = serde_json::from_value(value).map_err(WireError::from)?;
        Ok(rect)
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>, DriverError> {
        let value = self.get("screenshot").await?;
        let encoded = value
            .as_str()
            .ok_or(WireError::MissingField("screenshot data"))?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| DriverError::CommandFailed(format!("invalid screenshot payload: {e}")))
    }

    async fn perform_actions(&self, actions: Value) -> Result<(), DriverError> {
        self.post("actions", actions).await?;
        Ok(())
    }

    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError> {
        self.post(
            "execute/sync",
            json!({ "script": script, "args": args }),
        )
        .await
    }

    async fn hide_keyboard(&self) -> Result<(), DriverError> {
        self.post("appium/device/hide_keyboard", json!({})).await?;
        Ok(())
    }

    async fn back(&self) -> Result<(), DriverError> {
        self.post("back", json!({})).await?;
        Ok(())
    }

    async fn quit(&self) -> Result<(), DriverError> {
        debug!(session = %self.session, "deleting session");
        wire::delete(&self.http, &format!("{}/session/{}", self.base, self.session)).await?;
        Ok(())
    }
}
