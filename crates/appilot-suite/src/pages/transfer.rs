//! Transfer screen of the DigitalBank demo app.

use appilot_core::actions::{ActionOutcome, MobileActions};
use appilot_core::config::Platform;
use appilot_core::locator::{Locator, PlatformLocator};
use tracing::info;

fn account_dropdown() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("xyz.digitalbank.demo:id/accountSpinner"),
        Locator::ios_class_chain(
            "**/XCUIElementTypePickerWheel[`value == \"Individual Savings = 1000393.0\"`]",
        ),
    )
}

fn amount_field() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("xyz.digitalbank.demo:id/amountEditText"),
        Locator::ios_predicate("type==\"XCUIElementTypeTextField\" AND value==\"Enter Amount\""),
    )
}

fn description_field() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("xyz.digitalbank.demo:id/descriptionEditText"),
        Locator::ios_predicate(
            "type==\"XCUIElementTypeTextField\" AND value==\"Enter Description\"",
        ),
    )
}

fn credit_toggle() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("xyz.digitalbank.demo:id/creditRadioButton"),
        Locator::ios_predicate("type==\"XCUIElementTypeSwitch\""),
    )
}

fn submit_button() -> PlatformLocator {
    PlatformLocator::new(
        Locator::id("xyz.digitalbank.demo:id/submitButton"),
        Locator::ios_predicate("type==\"XCUIElementTypeButton\" AND name==\"Submit \""),
    )
}

fn android_account_option(account_name: &str) -> PlatformLocator {
    PlatformLocator::same(Locator::xpath(format!(
        "//android.widget.TextView[@text='{account_name}']"
    )))
}

/// Transfer page object: account selection, amount/description entry, the
/// credit toggle, and submission.
pub struct TransferPage {
    actions: MobileActions,
}

impl TransferPage {
    pub fn new(actions: MobileActions) -> Self {
        Self { actions }
    }

    /// Open the account dropdown and, on Android, pick the named account.
    ///
    /// The iOS picker wheel selects its value when tapped; there is no
    /// per-option element to click.
    pub async fn select_account(&self, account_name: Option<&str>) -> ActionOutcome {
        let step = self.actions.click(&account_dropdown(), None).await;
        if !step.is_success() {
            return step;
        }

        match (self.actions.platform(), account_name) {
            (Platform::Android, Some(name)) => {
                self.actions.click(&android_account_option(name), None).await
            }
            _ => step,
        }
    }

    pub async fn enter_amount(&self, amount: &str) -> ActionOutcome {
        self.actions.send_keys(&amount_field(), amount, true, None).await
    }

    pub async fn enter_description(&self, description: &str) -> ActionOutcome {
        self.actions
            .send_keys(&description_field(), description, true, None)
            .await
    }

    /// Turn the credit toggle on if it is not already selected.
    pub async fn select_credit(&self) -> ActionOutcome {
        if self.actions.is_selected(&credit_toggle(), None).await {
            return ActionOutcome::success("credit already selected");
        }
        self.actions.click(&credit_toggle(), None).await
    }

    pub async fn submit_transaction(&self) -> ActionOutcome {
        self.actions.click(&submit_button(), None).await
    }

    /// Whether all transfer form fields are present.
    pub async fn are_fields_present(&self) -> bool {
        self.actions.is_displayed(&account_dropdown(), None).await
            && self.actions.is_displayed(&amount_field(), None).await
            && self.actions.is_displayed(&description_field(), None).await
            && self.actions.is_displayed(&credit_toggle(), None).await
            && self.actions.is_displayed(&submit_button(), None).await
    }

    /// The complete credit-transfer flow, stopping at the first failed step.
    pub async fn submit_transfer(
        &self,
        account_name: Option<&str>,
        amount: &str,
        description: &str,
    ) -> ActionOutcome {
        info!(amount, "attempting transfer");

        let step = self.select_account(account_name).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_amount(amount).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_description(description).await;
        if !step.is_success() {
            return step;
        }
        let step = self.select_credit().await;
        if !step.is_success() {
            return step;
        }
        let step = self.submit_transaction().await;
        if step.is_success() {
            info!("transfer submitted");
        }
        step
    }
}
