//! Cart screen of the My Demo App.

use appilot_core::actions::{ActionOutcome, MobileActions, CHECK_WAIT};
use appilot_core::locator::{Locator, PlatformLocator};

fn cart_icon() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("com.saucelabs.mydemoapp.android:id/cartIV"),
        Locator::accessibility_id("tab bar option cart"),
    )
}

fn cart_item_title() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("com.saucelabs.mydemoapp.android:id/titleTV"),
        Locator::accessibility_id("Product Name"),
    )
}

fn remove_item_button() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("com.saucelabs.mydemoapp.android:id/removeBt"),
        Locator::accessibility_id("Remove Item"),
    )
}

fn empty_cart_label() -> PlatformLocator {
    PlatformLocator::new(
        Locator::xpath("//android.widget.TextView[@text='No Items']"),
        Locator::accessibility_id("No Items"),
    )
}

/// Cart page object: cart navigation and item management.
pub struct CartPage {
    actions: MobileActions,
}

impl CartPage {
    pub fn new(actions: MobileActions) -> Self {
        Self { actions }
    }

    /// Open the cart via the toolbar icon.
    pub async fn open_cart(&self) -> ActionOutcome {
        self.actions.click(&cart_icon(), None).await
    }

    /// Number of item rows currently in the cart.
    pub async fn get_cart_item_count(&self) -> usize {
        self.actions
            .wait_for_elements(&cart_item_title(), Some(CHECK_WAIT))
            .await
            .len()
    }

    /// Remove the item at the given row index.
    pub async fn remove_item_by_index(&self, index: usize) -> ActionOutcome {
        self.actions.click_nth(&remove_item_button(), index, None).await
    }

    /// Whether the empty-cart placeholder is shown.
    pub async fn is_cart_empty(&self) -> bool {
        self.actions
            .is_displayed(&empty_cart_label(), Some(CHECK_WAIT))
            .await
    }
}
