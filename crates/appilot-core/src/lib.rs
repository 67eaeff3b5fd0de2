//! # appilot-core
//!
//! Core library for cross-platform mobile UI test automation.
//!
//! This crate provides the foundational components for driving Android and
//! iOS applications through an Appium server speaking the W3C WebDriver
//! protocol: environment-based configuration, capability building, session
//! lifecycle management, a platform-dispatching action layer, and touch
//! gesture primitives.
//!
//! ## Modules
//!
//! - [`config`] - Environment-resolved framework configuration
//! - [`capabilities`] - Session capability builders for Android and iOS
//! - [`locator`] - Element locator strategies and per-platform locator pairs
//! - [`element`] - Element handle and geometry wire types
//! - [`wire`] - W3C WebDriver HTTP envelope plumbing
//! - [`driver`] - Backend-agnostic driver trait
//! - [`remote`] - Remote (HTTP) driver implementation
//! - [`session`] - Session open/close lifecycle
//! - [`actions`] - Platform-dispatching element action layer
//! - [`gestures`] - Touch gesture primitives
//! - [`logging`] - Tracing initialization for test runs
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use appilot_core::actions::MobileActions;
//! use appilot_core::config::Config;
//! use appilot_core::locator::{Locator, PlatformLocator};
//! use appilot_core::session;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let driver = session::start_session(&config).await?;
//! let driver = Arc::new(driver);
//!
//! let actions = MobileActions::from_config(driver.clone(), &config);
//! let login_button = PlatformLocator::same(Locator::accessibility_id("Login button"));
//! let outcome = actions.click(&login_button, None).await;
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod capabilities;
pub mod config;
pub mod driver;
pub mod element;
pub mod gestures;
pub mod locator;
pub mod logging;
pub mod remote;
pub mod session;
pub mod wire;
