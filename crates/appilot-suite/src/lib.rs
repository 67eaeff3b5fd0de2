//! # appilot-suite
//!
//! Cross-platform UI test suite for the My Demo App (storefront screens)
//! and the DigitalBank demo app (banking screens), built on
//! [`appilot_core`].
//!
//! Each screen is modeled as a page object: a table of per-platform
//! locators plus thin methods that delegate to the action layer. Composite
//! flows (like [`pages::LoginPage::login`]) chain several actions and stop
//! at the first failed step.
//!
//! The scenario tests live under `tests/` and run against a mock Appium
//! server; point `APPIUM_SERVER_URL` at a real server with a device attached
//! to run the same page objects against the actual apps.

pub mod pages;
