//! Product catalog screen of the My Demo App.

use appilot_core::actions::{ActionOutcome, MobileActions, CHECK_WAIT};
use appilot_core::locator::{Locator, PlatformLocator};

fn products_title() -> PlatformLocator {
    PlatformLocator::new(
        Locator::xpath("//android.widget.TextView[@text='Products']"),
        Locator::accessibility_id("Products"),
    )
}

fn product_item() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("com.saucelabs.mydemoapp.android:id/productIV"),
        Locator::accessibility_id("Product Image"),
    )
}

fn add_to_cart_button() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("com.saucelabs.mydemoapp.android:id/cartBt"),
        Locator::accessibility_id("Add To Cart"),
    )
}

fn cart_badge() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("com.saucelabs.mydemoapp.android:id/cartTV"),
        Locator::accessibility_id("tab bar option cart"),
    )
}

/// Product page object: catalog listing, product selection, add-to-cart.
pub struct ProductPage {
    actions: MobileActions,
}

impl ProductPage {
    pub fn new(actions: MobileActions) -> Self {
        Self { actions }
    }

    /// Whether the product catalog is shown.
    pub async fn is_product_page_displayed(&self) -> bool {
        self.actions
            .is_displayed(&products_title(), Some(CHECK_WAIT))
            .await
    }

    /// Number of products visible in the catalog.
    pub async fn get_product_count(&self) -> usize {
        self.actions.wait_for_elements(&product_item(), None).await.len()
    }

    /// Open the product at the given catalog index.
    pub async fn click_product_by_index(&self, index: usize) -> ActionOutcome {
        self.actions.click_nth(&product_item(), index, None).await
    }

    /// Add the currently open product to the cart.
    pub async fn add_to_cart(&self) -> ActionOutcome {
        self.actions.click(&add_to_cart_button(), None).await
    }

    /// The cart badge count; 0 when the badge is absent or blank.
    pub async fn get_cart_count(&self) -> u32 {
        let text = self.actions.text(&cart_badge(), Some(CHECK_WAIT)).await;
        text.trim().parse().unwrap_or(0)
    }

    /// Navigate back to the catalog from a product detail screen.
    pub async fn back_to_catalog(&self) -> ActionOutcome {
        self.actions.press_back().await
    }
}
