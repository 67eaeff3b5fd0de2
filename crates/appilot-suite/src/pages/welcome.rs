//! Welcome screen of the DigitalBank demo app.

use appilot_core::actions::{MobileActions, CHECK_WAIT};
use appilot_core::locator::{Locator, PlatformLocator};

fn welcome_title() -> PlatformLocator {
    PlatformLocator::new(
        Locator::accessibility_id("Welcome"),
        Locator::ios_class_chain("**/XCUIElementTypeStaticText[`name == \"Welcome\"`]"),
    )
}

/// Welcome page object.
pub struct WelcomePage {
    actions: MobileActions,
}

impl WelcomePage {
    pub fn new(actions: MobileActions) -> Self {
        Self { actions }
    }

    /// Whether the Welcome title is shown.
    pub async fn is_welcome_title_displayed(&self) -> bool {
        self.actions
            .is_displayed(&welcome_title(), Some(CHECK_WAIT))
            .await
    }

    /// The Welcome title text, or the empty string if it never appears.
    pub async fn get_welcome_text(&self) -> String {
        self.actions.text(&welcome_title(), None).await
    }
}
