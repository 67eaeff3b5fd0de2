//! Touch gesture primitives.
//!
//! [`MobileGestures`] wraps single W3C pointer-action sequences (move →
//! press → pause → move → release) and the platform-specific `mobile:`
//! script commands for pinch, zoom, and scrolling. Directional swipes derive
//! their start and end coordinates from the current window size; everything
//! else takes explicit coordinates or an element whose center becomes the
//! gesture target.
//!
//! Like the action layer, gestures never raise: failures are logged and
//! signaled through [`ActionOutcome`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{error, info};

use crate::actions::ActionOutcome;
use crate::config::{Config, Platform};
use crate::driver::{DriverError, MobileDriver};
use crate::element::Rect;
use crate::locator::{Locator, PlatformLocator};

/// Default swipe duration in milliseconds.
const SWIPE_DURATION_MS: u64 = 800;

/// Default long-press duration in milliseconds.
const LONG_PRESS_DURATION_MS: u64 = 2000;

/// Build a W3C actions payload around one touch-pointer sequence.
fn pointer_sequence(steps: Vec<Value>) -> Value {
    json!({
        "actions": [{
            "type": "pointer",
            "id": "finger1",
            "parameters": { "pointerType": "touch" },
            "actions": steps,
        }]
    })
}

/// A tap at the given coordinates.
pub fn tap_sequence(x: i64, y: i64) -> Value {
    pointer_sequence(vec![
        json!({ "type": "pointerMove", "duration": 0, "x": x, "y": y }),
        json!({ "type": "pointerDown", "button": 0 }),
        json!({ "type": "pointerUp", "button": 0 }),
    ])
}

/// A swipe: press at the start point, pause, glide to the end point.
pub fn swipe_sequence(start: (i64, i64), end: (i64, i64), duration: Duration) -> Value {
    pointer_sequence(vec![
        json!({ "type": "pointerMove", "duration": 0, "x": start.0, "y": start.1 }),
        json!({ "type": "pointerDown", "button": 0 }),
        json!({ "type": "pause", "duration": duration.as_millis() as u64 }),
        json!({ "type": "pointerMove", "duration": 0, "x": end.0, "y": end.1 }),
        json!({ "type": "pointerUp", "button": 0 }),
    ])
}

/// A press held at one point for the given duration.
pub fn long_press_sequence(x: i64, y: i64, duration: Duration) -> Value {
    pointer_sequence(vec![
        json!({ "type": "pointerMove", "duration": 0, "x": x, "y": y }),
        json!({ "type": "pointerDown", "button": 0 }),
        json!({ "type": "pause", "duration": duration.as_millis() as u64 }),
        json!({ "type": "pointerUp", "button": 0 }),
    ])
}

/// Cross-platform touch gestures over a driver session.
#[derive(Clone)]
pub struct MobileGestures {
    driver: Arc<dyn MobileDriver>,
    platform: Platform,
}

impl MobileGestures {
    pub fn new(driver: Arc<dyn MobileDriver>, platform: Platform) -> Self {
        Self { driver, platform }
    }

    pub fn from_config(driver: Arc<dyn MobileDriver>, config: &Config) -> Self {
        Self::new(driver, config.platform)
    }

    fn resolve<'a>(&self, pair: &'a PlatformLocator) -> &'a Locator {
        pair.resolved(self.platform)
    }

    /// Locate an element (single attempt) and return its center point.
    async fn element_center(&self, pair: &PlatformLocator) -> Result<(i64, i64), DriverError> {
        let locator = self.resolve(pair);
        let element = self.driver.find_element(locator).await?;
        let rect: Rect = self.driver.rect(&element).await?;
        Ok(rect.center())
    }

    fn outcome(result: Result<(), DriverError>, description: &str) -> ActionOutcome {
        match result {
            Ok(()) => {
                info!(gesture = description, "gesture performed");
                ActionOutcome::success(description.to_string())
            }
            Err(e) => {
                error!(gesture = description, error = %e, "gesture failed");
                ActionOutcome::failure(format!("{description} failed: {e}"))
            }
        }
    }

    /// Swipe from one point to another.
    pub async fn swipe(
        &self,
        start: (i64, i64),
        end: (i64, i64),
        duration_ms: u64,
    ) -> ActionOutcome {
        let sequence = swipe_sequence(start, end, Duration::from_millis(duration_ms));
        Self::outcome(
            self.driver.perform_actions(sequence).await,
            &format!("swipe {start:?} -> {end:?}"),
        )
    }

    /// Swipe left across the middle of the screen.
    pub async fn swipe_left(&self) -> ActionOutcome {
        match self.driver.window_rect().await {
            Ok(size) => {
                let start_x = (size.width * 0.8) as i64;
                let end_x = (size.width * 0.2) as i64;
                let y = (size.height * 0.5) as i64;
                self.swipe((start_x, y), (end_x, y), SWIPE_DURATION_MS).await
            }
            Err(e) => ActionOutcome::failure(format!("swipe left failed: {e}")),
        }
    }

    /// Swipe right across the middle of the screen.
    pub async fn swipe_right(&self) -> ActionOutcome {
        match self.driver.window_rect().await {
            Ok(size) => {
                let start_x = (size.width * 0.2) as i64;
                let end_x = (size.width * 0.8) as i64;
                let y = (size.height * 0.5) as i64;
                self.swipe((start_x, y), (end_x, y), SWIPE_DURATION_MS).await
            }
            Err(e) => ActionOutcome::failure(format!("swipe right failed: {e}")),
        }
    }

    /// Swipe up (scrolls content down).
    pub async fn swipe_up(&self) -> ActionOutcome {
        match self.driver.window_rect().await {
            Ok(size) => {
                let x = (size.width * 0.5) as i64;
                let start_y = (size.height * 0.8) as i64;
                let end_y = (size.height * 0.2) as i64;
                self.swipe((x, start_y), (x, end_y), SWIPE_DURATION_MS).await
            }
            Err(e) => ActionOutcome::failure(format!("swipe up failed: {e}")),
        }
    }

    /// Swipe down (scrolls content up).
    pub async fn swipe_down(&self) -> ActionOutcome {
        match self.driver.window_rect().await {
            Ok(size) => {
                let x = (size.width * 0.5) as i64;
                let start_y = (size.height * 0.2) as i64;
                let end_y = (size.height * 0.8) as i64;
                self.swipe((x, start_y), (x, end_y), SWIPE_DURATION_MS).await
            }
            Err(e) => ActionOutcome::failure(format!("swipe down failed: {e}")),
        }
    }

    /// Tap at the given coordinates.
    pub async fn tap(&self, x: i64, y: i64) -> ActionOutcome {
        Self::outcome(
            self.driver.perform_actions(tap_sequence(x, y)).await,
            &format!("tap at ({x}, {y})"),
        )
    }

    /// Double-tap the center of an element.
    pub async fn double_tap(&self, pair: &PlatformLocator) -> ActionOutcome {
        let (x, y) = match self.element_center(pair).await {
            Ok(center) => center,
            Err(e) => return ActionOutcome::failure(format!("double tap failed: {e}")),
        };

        let first = self.driver.perform_actions(tap_sequence(x, y)).await;
        let result = match first {
            Ok(()) => self.driver.perform_actions(tap_sequence(x, y)).await,
            Err(e) => Err(e),
        };
        Self::outcome(result, &format!("double tap at ({x}, {y})"))
    }

    /// Long-press the center of an element.
    pub async fn long_press(
        &self,
        pair: &PlatformLocator,
        duration_ms: Option<u64>,
    ) -> ActionOutcome {
        let (x, y) = match self.element_center(pair).await {
            Ok(center) => center,
            Err(e) => return ActionOutcome::failure(format!("long press failed: {e}")),
        };

        let duration = Duration::from_millis(duration_ms.unwrap_or(LONG_PRESS_DURATION_MS));
        Self::outcome(
            self.driver
                .perform_actions(long_press_sequence(x, y, duration))
                .await,
            &format!("long press at ({x}, {y})"),
        )
    }

    /// Pinch (zoom out) on an element.
    pub async fn pinch(&self, pair: &PlatformLocator, percent: u32) -> ActionOutcome {
        self.scale_gesture(pair, percent, "pinchCloseGesture", "pinch")
            .await
    }

    /// Zoom (pinch open) on an element.
    pub async fn zoom(&self, pair: &PlatformLocator, percent: u32) -> ActionOutcome {
        self.scale_gesture(pair, percent, "pinchOpenGesture", "zoom")
            .await
    }

    async fn scale_gesture(
        &self,
        pair: &PlatformLocator,
        percent: u32,
        android_command: &str,
        description: &str,
    ) -> ActionOutcome {
        let locator = self.resolve(pair);
        let element = match self.driver.find_element(locator).await {
            Ok(element) => element,
            Err(e) => return ActionOutcome::failure(format!("{description} failed: {e}")),
        };

        let scale = f64::from(percent) / 100.0;
        let (script, args) = match self.platform {
            Platform::Android => (
                format!("mobile: {android_command}"),
                json!({ "elementId": element.as_str(), "percent": scale, "speed": 50 }),
            ),
            Platform::Ios => (
                "mobile: pinch".to_string(),
                json!({ "elementId": element.as_str(), "scale": scale, "velocity": 1.0 }),
            ),
        };

        Self::outcome(
            self.driver
                .execute_script(&script, vec![args])
                .await
                .map(|_| ()),
            description,
        )
    }

    /// Scroll until the element is visible.
    pub async fn scroll_to_element(&self, pair: &PlatformLocator) -> ActionOutcome {
        let locator = self.resolve(pair);
        let result = match self.platform {
            Platform::Android => {
                // The server resolves the target itself; no element lookup
                // is needed before scrolling.
                let args = json!({
                    "strategy": locator.strategy.as_wire(),
                    "selector": locator.selector,
                });
                self.driver
                    .execute_script("mobile: scrollToElement", vec![args])
                    .await
            }
            Platform::Ios => {
                match self.driver.find_element(locator).await {
                    Ok(element) => {
                        let args = json!({
                            "elementId": element.as_str(),
                            "toVisible": true,
                        });
                        self.driver.execute_script("mobile: scroll", vec![args]).await
                    }
                    Err(e) => Err(e),
                }
            }
        };

        Self::outcome(result.map(|_| ()), &format!("scroll to {locator}"))
    }
}
