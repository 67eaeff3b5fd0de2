//! Platform-dispatching element action layer.
//!
//! [`MobileActions`] translates logical UI actions into concrete,
//! time-bounded driver commands, hiding per-platform element identification
//! from page objects. Each operation is a single bounded wait-then-act: wait
//! up to the explicit-wait timeout for the element to become visible, then
//! perform the interaction once. There is no retry beyond that wait;
//! composing retries is a caller responsibility.
//!
//! No error crosses this layer's boundary. Every failure is logged and
//! converted into an [`ActionOutcome`] (or an empty value for queries), so
//! page objects and tests decide what a failure means instead of handling
//! exceptions.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use appilot_core::actions::MobileActions;
//! use appilot_core::config::Config;
//! use appilot_core::locator::{Locator, PlatformLocator};
//! # async fn example(driver: Arc<dyn appilot_core::driver::MobileDriver>) {
//! let config = Config::from_env().unwrap();
//! let actions = MobileActions::from_config(driver, &config);
//!
//! let username = PlatformLocator::same(Locator::accessibility_id("Username input field"));
//! let outcome = actions.send_keys(&username, "bob@example.com", true, None).await;
//! if !outcome.is_success() {
//!     eprintln!("could not type username: {}", outcome.message);
//! }
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::{Config, Platform};
use crate::driver::MobileDriver;
use crate::element::ElementId;
use crate::gestures;
use crate::locator::{Locator, PlatformLocator};

/// How often the wait loops re-poll the server for an element.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Bound used for presence checks that should not consume the full
/// explicit wait (error banners, field presence probes).
pub const CHECK_WAIT: Duration = Duration::from_secs(5);

/// The result of an action-layer operation.
///
/// Carries a diagnostic message alongside the success flag so callers can
/// surface *why* a step failed instead of just that it did.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// Whether the operation completed.
    pub success: bool,
    /// Human-readable description of what happened.
    pub message: String,
}

impl ActionOutcome {
    /// Creates a successful outcome with a message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Creates a failure outcome with a diagnostic message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Cross-platform element actions over a driver session.
///
/// The platform is captured once at construction (from the configuration
/// that opened the session) and never re-tested per call; locator pairs are
/// resolved against it for the lifetime of the session.
#[derive(Clone)]
pub struct MobileActions {
    driver: Arc<dyn MobileDriver>,
    platform: Platform,
    explicit_wait: Duration,
    screenshots_dir: PathBuf,
}

impl MobileActions {
    pub fn new(
        driver: Arc<dyn MobileDriver>,
        platform: Platform,
        explicit_wait: Duration,
        screenshots_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            driver,
            platform,
            explicit_wait,
            screenshots_dir: screenshots_dir.into(),
        }
    }

    /// Convenience constructor taking defaults from the configuration.
    pub fn from_config(driver: Arc<dyn MobileDriver>, config: &Config) -> Self {
        Self::new(
            driver,
            config.platform,
            config.explicit_wait,
            config.screenshots_dir.clone(),
        )
    }

    /// The platform this layer dispatches to.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns a reference to the underlying driver.
    pub fn driver(&self) -> &Arc<dyn MobileDriver> {
        &self.driver
    }

    /// The locator matching the active platform.
    pub fn resolve<'a>(&self, pair: &'a PlatformLocator) -> &'a Locator {
        pair.resolved(self.platform)
    }

    /// Wait for an element to become visible.
    ///
    /// This is the shared primitive underlying every other operation: the
    /// server is polled until the element is found *and* displayed, or the
    /// timeout (default: the configured explicit wait) elapses. Lookup
    /// errors other than "not found yet" are logged and polling continues;
    /// on timeout the result is `None`, never an error.
    pub async fn wait_for_element(
        &self,
        pair: &PlatformLocator,
        timeout: Option<Duration>,
    ) -> Option<ElementId> {
        let locator = self.resolve(pair);
        let deadline = Instant::now() + timeout.unwrap_or(self.explicit_wait);

        loop {
            match self.driver.find_element(locator).await {
                Ok(element) => match self.driver.is_displayed(&element).await {
                    Ok(true) => {
                        debug!(%locator, %element, "element visible");
                        return Some(element);
                    }
                    Ok(false) => debug!(%locator, "element present but not visible"),
                    Err(e) => debug!(%locator, error = %e, "visibility check failed"),
                },
                Err(e) if e.is_no_such_element() => {}
                Err(e) => warn!(%locator, error = %e, "element lookup failed"),
            }

            if Instant::now() >= deadline {
                warn!(%locator, "timed out waiting for element");
                return None;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for at least one matching element; returns all matches.
    ///
    /// Empty on timeout.
    pub async fn wait_for_elements(
        &self,
        pair: &PlatformLocator,
        timeout: Option<Duration>,
    ) -> Vec<ElementId> {
        let locator = self.resolve(pair);
        let deadline = Instant::now() + timeout.unwrap_or(self.explicit_wait);

        loop {
            match self.driver.find_elements(locator).await {
                Ok(elements) if !elements.is_empty() => {
                    debug!(%locator, count = elements.len(), "elements found");
                    return elements;
                }
                Ok(_) => {}
                Err(e) => warn!(%locator, error = %e, "element list lookup failed"),
            }

            if Instant::now() >= deadline {
                warn!(%locator, "timed out waiting for elements");
                return Vec::new();
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for the element and click it.
    pub async fn click(&self, pair: &PlatformLocator, timeout: Option<Duration>) -> ActionOutcome {
        let locator = self.resolve(pair);
        let Some(element) = self.wait_for_element(pair, timeout).await else {
            return ActionOutcome::failure(format!("timed out waiting for {locator}"));
        };

        match self.driver.click(&element).await {
            Ok(()) => {
                info!(%locator, "clicked element");
                ActionOutcome::success(format!("clicked {locator}"))
            }
            Err(e) => {
                error!(%locator, error = %e, "failed to click element");
                ActionOutcome::failure(format!("click on {locator} failed: {e}"))
            }
        }
    }

    /// Wait for the matching elements and click the one at `index`.
    ///
    /// Used by list screens (products, cart rows) where one locator matches
    /// several elements.
    pub async fn click_nth(
        &self,
        pair: &PlatformLocator,
        index: usize,
        timeout: Option<Duration>,
    ) -> ActionOutcome {
        let locator = self.resolve(pair);
        let elements = self.wait_for_elements(pair, timeout).await;
        let Some(element) = elements.get(index) else {
            return ActionOutcome::failure(format!(
                "no element at index {index} for {locator} ({} found)",
                elements.len()
            ));
        };

        match self.driver.click(element).await {
            Ok(()) => {
                info!(%locator, index, "clicked element");
                ActionOutcome::success(format!("clicked {locator} [{index}]"))
            }
            Err(e) => {
                error!(%locator, index, error = %e, "failed to click element");
                ActionOutcome::failure(format!("click on {locator} [{index}] failed: {e}"))
            }
        }
    }

    /// Wait for the element and type into it, clearing existing content
    /// first unless disabled.
    pub async fn send_keys(
        &self,
        pair: &PlatformLocator,
        text: &str,
        clear_first: bool,
        timeout: Option<Duration>,
    ) -> ActionOutcome {
        let locator = self.resolve(pair);
        let Some(element) = self.wait_for_element(pair, timeout).await else {
            return ActionOutcome::failure(format!("timed out waiting for {locator}"));
        };

        if clear_first {
            if let Err(e) = self.driver.clear(&element).await {
                error!(%locator, error = %e, "failed to clear element");
                return ActionOutcome::failure(format!("clear of {locator} failed: {e}"));
            }
        }

        match self.driver.send_keys(&element, text).await {
            Ok(()) => {
                info!(%locator, "sent keys to element");
                ActionOutcome::success(format!("sent keys to {locator}"))
            }
            Err(e) => {
                error!(%locator, error = %e, "failed to send keys");
                ActionOutcome::failure(format!("send keys to {locator} failed: {e}"))
            }
        }
    }

    /// The element's text, or the empty string on timeout or error.
    ///
    /// An absent element and an element with genuinely empty text are not
    /// distinguishable through this method; callers that care should probe
    /// [`is_displayed`](Self::is_displayed) first.
    pub async fn text(&self, pair: &PlatformLocator, timeout: Option<Duration>) -> String {
        let locator = self.resolve(pair);
        let Some(element) = self.wait_for_element(pair, timeout).await else {
            return String::new();
        };

        match self.driver.text(&element).await {
            Ok(text) => {
                debug!(%locator, %text, "retrieved element text");
                text
            }
            Err(e) => {
                error!(%locator, error = %e, "failed to get element text");
                String::new()
            }
        }
    }

    /// An attribute value, or the empty string on timeout, error, or an
    /// absent attribute.
    pub async fn attribute(
        &self,
        pair: &PlatformLocator,
        name: &str,
        timeout: Option<Duration>,
    ) -> String {
        let locator = self.resolve(pair);
        let Some(element) = self.wait_for_element(pair, timeout).await else {
            return String::new();
        };

        match self.driver.attribute(&element, name).await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                error!(%locator, attribute = name, error = %e, "failed to get attribute");
                String::new()
            }
        }
    }

    /// Whether the element becomes visible within the timeout.
    pub async fn is_displayed(&self, pair: &PlatformLocator, timeout: Option<Duration>) -> bool {
        self.wait_for_element(pair, timeout).await.is_some()
    }

    /// Whether the element becomes visible and is enabled.
    pub async fn is_enabled(&self, pair: &PlatformLocator, timeout: Option<Duration>) -> bool {
        let locator = self.resolve(pair);
        let Some(element) = self.wait_for_element(pair, timeout).await else {
            return false;
        };

        match self.driver.is_enabled(&element).await {
            Ok(enabled) => enabled,
            Err(e) => {
                error!(%locator, error = %e, "failed to check enabled state");
                false
            }
        }
    }

    /// Whether a selectable element (radio, switch) is currently selected.
    pub async fn is_selected(&self, pair: &PlatformLocator, timeout: Option<Duration>) -> bool {
        let locator = self.resolve(pair);
        let Some(element) = self.wait_for_element(pair, timeout).await else {
            return false;
        };

        match self.driver.is_selected(&element).await {
            Ok(selected) => selected,
            Err(e) => {
                error!(%locator, error = %e, "failed to check selected state");
                false
            }
        }
    }

    /// Dismiss the software keyboard.
    ///
    /// Android has a native hide command; XCUITest does not, so on iOS this
    /// taps a point above the keyboard region. The tap target is a
    /// heuristic; failure here is non-fatal to the calling flow.
    pub async fn hide_keyboard(&self) -> ActionOutcome {
        let result = match self.platform {
            Platform::Android => self.driver.hide_keyboard().await,
            Platform::Ios => match self.driver.window_rect().await {
                Ok(rect) => {
                    let x = (rect.width / 2.0) as i64;
                    self.driver
                        .perform_actions(gestures::tap_sequence(x, 50))
                        .await
                }
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(()) => {
                debug!("keyboard hidden");
                ActionOutcome::success("keyboard hidden")
            }
            Err(e) => {
                warn!(error = %e, "failed to hide keyboard");
                ActionOutcome::failure(format!("failed to hide keyboard: {e}"))
            }
        }
    }

    /// Navigate back.
    pub async fn press_back(&self) -> ActionOutcome {
        match self.driver.back().await {
            Ok(()) => ActionOutcome::success("navigated back"),
            Err(e) => {
                error!(error = %e, "failed to navigate back");
                ActionOutcome::failure(format!("failed to navigate back: {e}"))
            }
        }
    }

    /// Capture the current screen and persist it under the screenshots
    /// directory as `<prefix>_<timestamp>.png`.
    ///
    /// Used for failure diagnostics; never blocks the action flow. Any
    /// error is logged and reported as `None`.
    pub async fn take_screenshot(&self, prefix: &str) -> Option<PathBuf> {
        let bytes = match self.driver.screenshot_png().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "failed to capture screenshot");
                return None;
            }
        };

        if let Err(e) = std::fs::create_dir_all(&self.screenshots_dir) {
            error!(dir = %self.screenshots_dir.display(), error = %e, "cannot create screenshots dir");
            return None;
        }

        let filename = format!("{prefix}_{}.png", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.screenshots_dir.join(filename);
        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                info!(path = %path.display(), "screenshot saved");
                Some(path)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to write screenshot");
                None
            }
        }
    }

    /// The screenshots directory this layer writes into.
    pub fn screenshots_dir(&self) -> &Path {
        &self.screenshots_dir
    }
}
