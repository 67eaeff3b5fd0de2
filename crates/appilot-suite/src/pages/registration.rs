//! Registration screen of the DigitalBank demo app.
//!
//! Unlike the other screens, the two platforms disagree on the *shape* of
//! this form (iOS adds zip code, phone, and a terms switch; the title picker
//! is a spinner on Android and three discrete buttons on iOS), so the
//! locator table is keyed by field name and built once for the active
//! platform at construction.

use std::collections::HashMap;

use appilot_core::actions::{ActionOutcome, MobileActions, CHECK_WAIT};
use appilot_core::config::Platform;
use appilot_core::locator::{Locator, PlatformLocator};
use tracing::{info, warn};

fn android_fields() -> HashMap<&'static str, Locator> {
    HashMap::from([
        ("title", Locator::accessibility_id("Create a new account")),
        ("title_spinner", Locator::accessibility_id("Select Title")),
        ("first_name", Locator::accessibility_id("Enter First Name")),
        ("last_name", Locator::accessibility_id("Enter Last Name")),
        ("gender_male", Locator::accessibility_id("Select Male Gender")),
        (
            "gender_female",
            Locator::accessibility_id("Select Female Gender"),
        ),
        ("dob", Locator::accessibility_id("Date of Birth")),
        ("ssn", Locator::accessibility_id("Social Security Number")),
        ("email", Locator::accessibility_id("Email Address")),
        ("password", Locator::accessibility_id("Enter Password")),
        ("address", Locator::accessibility_id("Enter Address")),
        ("region", Locator::accessibility_id("Enter Region")),
        ("locality", Locator::id("xyz.digitalbank.demo:id/localityInput")),
        (
            "register_button",
            Locator::android_uiautomator("new UiSelector().text(\"Register\")"),
        ),
        ("error_message", Locator::id("xyz.digitalbank.demo:id/errorTextView")),
    ])
}

fn ios_fields() -> HashMap<&'static str, Locator> {
    HashMap::from([
        ("title", Locator::accessibility_id("Create a new account")),
        ("mr", Locator::accessibility_id("Mr.")),
        ("mrs", Locator::accessibility_id("Mrs.")),
        ("ms", Locator::accessibility_id("Ms.")),
        ("first_name", Locator::accessibility_id("First Name")),
        ("last_name", Locator::accessibility_id("Last Name")),
        ("gender_male", Locator::accessibility_id("Male")),
        ("gender_female", Locator::accessibility_id("Female")),
        ("dob", Locator::accessibility_id("Date Picker")),
        ("password", Locator::accessibility_id("Password")),
        ("email", Locator::accessibility_id("Email Address")),
        ("ssn", Locator::accessibility_id("Social Security Number")),
        ("address", Locator::accessibility_id("Address")),
        ("locality", Locator::accessibility_id("Locality")),
        ("region", Locator::accessibility_id("Region")),
        ("zipcode", Locator::accessibility_id("Zip Code")),
        ("phone", Locator::accessibility_id("Phone Number")),
        (
            "agree_terms",
            Locator::accessibility_id("Agree to Term and Conditions"),
        ),
        ("register_button", Locator::accessibility_id("Register")),
        ("error_message", Locator::accessibility_id("Error Message")),
    ])
}

/// Registration page object with a name-keyed locator table.
pub struct RegistrationPage {
    actions: MobileActions,
    fields: HashMap<&'static str, Locator>,
}

impl RegistrationPage {
    pub fn new(actions: MobileActions) -> Self {
        let fields = match actions.platform() {
            Platform::Android => android_fields(),
            Platform::Ios => ios_fields(),
        };
        Self { actions, fields }
    }

    fn field(&self, name: &str) -> Option<PlatformLocator> {
        match self.fields.get(name) {
            Some(locator) => Some(PlatformLocator::same(locator.clone())),
            None => {
                warn!(field = name, "unknown registration field");
                None
            }
        }
    }

    async fn enter(&self, name: &str, value: &str) -> ActionOutcome {
        let Some(pair) = self.field(name) else {
            return ActionOutcome::failure(format!("unknown registration field '{name}'"));
        };
        let outcome = self.actions.send_keys(&pair, value, true, None).await;
        if outcome.is_success() {
            info!(field = name, "entered registration field");
        }
        outcome
    }

    pub async fn enter_first_name(&self, first_name: &str) -> ActionOutcome {
        self.enter("first_name", first_name).await
    }

    pub async fn enter_last_name(&self, last_name: &str) -> ActionOutcome {
        self.enter("last_name", last_name).await
    }

    pub async fn enter_email(&self, email: &str) -> ActionOutcome {
        self.enter("email", email).await
    }

    pub async fn enter_password(&self, password: &str) -> ActionOutcome {
        self.enter("password", password).await
    }

    pub async fn enter_ssn(&self, ssn: &str) -> ActionOutcome {
        self.enter("ssn", ssn).await
    }

    pub async fn click_register(&self) -> ActionOutcome {
        let Some(pair) = self.field("register_button") else {
            return ActionOutcome::failure("unknown registration field 'register_button'");
        };
        self.actions.click(&pair, None).await
    }

    /// Fill the mandatory fields and submit, stopping at the first failure.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        ssn: &str,
    ) -> ActionOutcome {
        info!(email, "attempting registration");

        let step = self.enter_first_name(first_name).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_last_name(last_name).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_email(email).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_password(password).await;
        if !step.is_success() {
            return step;
        }
        let step = self.enter_ssn(ssn).await;
        if !step.is_success() {
            return step;
        }
        self.click_register().await
    }

    /// Whether the named field is visible on this platform's form.
    ///
    /// Unknown names are reported as absent rather than raising.
    pub async fn is_field_present(&self, name: &str) -> bool {
        match self.field(name) {
            Some(pair) => self.actions.is_displayed(&pair, Some(CHECK_WAIT)).await,
            None => false,
        }
    }

    /// The visible validation error, or the empty string when none is shown.
    pub async fn get_error_message(&self) -> String {
        match self.field("error_message") {
            Some(pair) => self.actions.text(&pair, Some(CHECK_WAIT)).await,
            None => String::new(),
        }
    }
}
