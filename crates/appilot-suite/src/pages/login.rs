//! Login screen of the My Demo App.

use appilot_core::actions::{ActionOutcome, MobileActions, CHECK_WAIT};
use appilot_core::locator::{Locator, PlatformLocator};
use tracing::info;

fn menu_button() -> PlatformLocator {
    PlatformLocator::new(
        Locator::xpath(
            "//android.view.ViewGroup[@content-desc='open menu']/android.widget.ImageView",
        ),
        Locator::accessibility_id("tab bar option menu"),
    )
}

fn login_menu_item() -> PlatformLocator {
    PlatformLocator::same(Locator::accessibility_id("menu item log in"))
}

fn username_field() -> PlatformLocator {
    PlatformLocator::same(Locator::accessibility_id("Username input field"))
}

fn password_field() -> PlatformLocator {
    PlatformLocator::same(Locator::accessibility_id("Password input field"))
}

fn login_button() -> PlatformLocator {
    PlatformLocator::same(Locator::accessibility_id("Login button"))
}

fn error_message() -> PlatformLocator {
    PlatformLocator::new(
        Locator::xpath(
            "//android.view.ViewGroup[@content-desc='generic-error-message']/android.widget.TextView",
        ),
        Locator::accessibility_id("generic-error-message"),
    )
}

fn logout_menu_item() -> PlatformLocator {
    PlatformLocator::same(Locator::accessibility_id("menu item log out"))
}

fn confirm_logout_button() -> PlatformLocator {
    PlatformLocator::new(
        Locator::xpath("//android.widget.Button[@resource-id='android:id/button1']"),
        Locator::accessibility_id("Log Out"),
    )
}

/// Login page object: menu navigation, credential entry, and the composite
/// login/logout flows.
pub struct LoginPage {
    actions: MobileActions,
}

impl LoginPage {
    pub fn new(actions: MobileActions) -> Self {
        Self { actions }
    }

    /// Open the hamburger/tab menu.
    pub async fn open_menu(&self) -> ActionOutcome {
        self.actions.click(&menu_button(), None).await
    }

    /// Navigate from the menu to the login screen.
    pub async fn navigate_to_login(&self) -> ActionOutcome {
        let step = self.open_menu().await;
        if !step.is_success() {
            return step;
        }
        self.actions.click(&login_menu_item(), None).await
    }

    pub async fn enter_username(&self, username: &str) -> ActionOutcome {
        self.actions
            .send_keys(&username_field(), username, true, None)
            .await
    }

    pub async fn enter_password(&self, password: &str) -> ActionOutcome {
        self.actions
            .send_keys(&password_field(), password, true, None)
            .await
    }

    pub async fn click_login_button(&self) -> ActionOutcome {
        self.actions.click(&login_button(), None).await
    }

    /// The complete login flow.
    ///
    /// Stops at the first failed step: if username entry fails, password
    /// entry is never attempted.
    pub async fn login(&self, username: &str, password: &str) -> ActionOutcome {
        info!(username, "attempting login");

        let step = self.navigate_to_login().await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_username(username).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_password(password).await;
        if !step.is_success() {
            return step;
        }
        let step = self.click_login_button().await;
        if !step.is_success() {
            return step;
        }

        // A sticky keyboard must not fail the flow.
        let _ = self.actions.hide_keyboard().await;

        info!("login flow completed");
        ActionOutcome::success("login flow completed")
    }

    /// Whether the credential error banner is shown.
    pub async fn is_error_displayed(&self) -> bool {
        self.actions
            .is_displayed(&error_message(), Some(CHECK_WAIT))
            .await
    }

    /// The credential error text, or the empty string when no banner (or a
    /// blank banner) is shown.
    pub async fn get_error_message(&self) -> String {
        self.actions.text(&error_message(), None).await
    }

    /// Log the current user out via the menu, confirming the dialog.
    pub async fn logout(&self) -> ActionOutcome {
        info!("attempting logout");

        let step = self.open_menu().await;
        if !step.is_success() {
            return step;
        }
        let step = self.actions.click(&logout_menu_item(), None).await;
        if !step.is_success() {
            return step;
        }
        let step = self.actions.click(&confirm_logout_button(), None).await;
        if step.is_success() {
            info!("logout successful");
        }
        step
    }
}
