//! Backend-agnostic driver trait for mobile UI automation.
//!
//! This module defines the [`MobileDriver`] trait, the seam between the
//! action/gesture layers and whatever actually executes UI commands. The
//! production backend is [`RemoteDriver`](crate::remote::RemoteDriver),
//! which speaks the WebDriver protocol to an Appium server; tests swap in
//! scripted backends behind the same `Arc<dyn MobileDriver>`.
//!
//! Commands are element-oriented: callers first locate an element (getting
//! an opaque [`ElementId`]) and then act on it. The trait deliberately does
//! not know about platforms or locator pairs; platform dispatch happens one
//! layer up, in [`crate::actions`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::element::{ElementId, Rect};
use crate::locator::Locator;
use crate::wire::WireError;

/// Errors that can occur during driver operations.
///
/// This unifies errors from all backends behind a single type so the action
/// layer can handle failures uniformly.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A protocol or transport error from the WebDriver endpoint.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A backend-specific command failure.
    #[error("command failed: {0}")]
    CommandFailed(String),
}

impl DriverError {
    /// True when the failure means "element not located" rather than a
    /// broken session; wait loops poll again on this.
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, DriverError::Wire(e) if e.is_no_such_element())
    }
}

/// Trait for backend-agnostic mobile UI automation.
///
/// All methods that interact with the device are async; one session is
/// driven by one logical test at a time, so implementations may assume
/// sequential use.
#[async_trait]
pub trait MobileDriver: Send + Sync {
    /// The server-assigned session identifier.
    fn session_id(&self) -> &str;

    /// Locate the first element matching the locator.
    async fn find_element(&self, locator: &Locator) -> Result<ElementId, DriverError>;

    /// Locate every element matching the locator.
    ///
    /// An empty list is not an error.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementId>, DriverError>;

    /// Click an element.
    async fn click(&self, element: &ElementId) -> Result<(), DriverError>;

    /// Clear an editable element's content.
    async fn clear(&self, element: &ElementId) -> Result<(), DriverError>;

    /// Type text into an element.
    async fn send_keys(&self, element: &ElementId, text: &str) -> Result<(), DriverError>;

    /// The element's visible text.
    async fn text(&self, element: &ElementId) -> Result<String, DriverError>;

    /// An element attribute value, or `None` when the attribute is absent.
    async fn attribute(
        &self,
        element: &ElementId,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Whether the element is currently displayed.
    async fn is_displayed(&self, element: &ElementId) -> Result<bool, DriverError>;

    /// Whether the element is enabled for interaction.
    async fn is_enabled(&self, element: &ElementId) -> Result<bool, DriverError>;

    /// Whether a selectable element (radio, switch, checkbox) is selected.
    async fn is_selected(&self, element: &ElementId) -> Result<bool, DriverError>;

    /// The element's frame in screen points.
    async fn rect(&self, element: &ElementId) -> Result<Rect, DriverError>;

    /// The current window's frame in screen points.
    async fn window_rect(&self) -> Result<Rect, DriverError>;

    /// Capture the current screen as PNG bytes.
    async fn screenshot_png(&self) -> Result<Vec<u8>, DriverError>;

    /// Perform a W3C actions sequence (touch pointer gestures).
    async fn perform_actions(&self, actions: Value) -> Result<(), DriverError>;

    /// Execute a driver script command (`mobile:` gesture extensions).
    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError>;

    /// Dismiss the software keyboard via the server's native command.
    ///
    /// Only reliable on Android; see
    /// [`MobileActions::hide_keyboard`](crate::actions::MobileActions::hide_keyboard)
    /// for the cross-platform wrapper.
    async fn hide_keyboard(&self) -> Result<(), DriverError>;

    /// Navigate back (Android hardware back / iOS navigation pop).
    async fn back(&self) -> Result<(), DriverError>;

    /// End the session on the server.
    async fn quit(&self) -> Result<(), DriverError>;
}
