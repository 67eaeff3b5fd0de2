//! Element locator strategies and per-platform locator pairs.
//!
//! A [`Locator`] is a (strategy, selector) pair, opaque to the action layer.
//! Page objects declare a [`PlatformLocator`] for each logical element (one
//! locator per platform), and the active platform picks exactly one of them
//! for the lifetime of the session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Platform;

/// Element identification strategies understood by the Appium server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Accessibility identifier (`content-desc` on Android, `name` on iOS).
    AccessibilityId,
    /// XPath over the page source.
    Xpath,
    /// Native resource/element id.
    Id,
    /// Native widget class name.
    ClassName,
    /// `UiSelector` expression (Android only).
    AndroidUiAutomator,
    /// Class chain query (iOS only).
    IosClassChain,
    /// `NSPredicate` query (iOS only).
    IosPredicate,
}

impl Strategy {
    /// The `using` value sent over the wire for this strategy.
    pub fn as_wire(self) -> &'static str {
        match self {
            Strategy::AccessibilityId => "accessibility id",
            Strategy::Xpath => "xpath",
            Strategy::Id => "id",
            Strategy::ClassName => "class name",
            Strategy::AndroidUiAutomator => "-android uiautomator",
            Strategy::IosClassChain => "-ios class chain",
            Strategy::IosPredicate => "-ios predicate string",
        }
    }
}

/// A (strategy, selector) pair identifying one UI element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub strategy: Strategy,
    pub selector: String,
}

impl Locator {
    pub fn new(strategy: Strategy, selector: impl Into<String>) -> Self {
        Self {
            strategy,
            selector: selector.into(),
        }
    }

    pub fn accessibility_id(selector: impl Into<String>) -> Self {
        Self::new(Strategy::AccessibilityId, selector)
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(Strategy::Xpath, selector)
    }

    pub fn id(selector: impl Into<String>) -> Self {
        Self::new(Strategy::Id, selector)
    }

    pub fn class_name(selector: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, selector)
    }

    pub fn android_uiautomator(selector: impl Into<String>) -> Self {
        Self::new(Strategy::AndroidUiAutomator, selector)
    }

    pub fn ios_class_chain(selector: impl Into<String>) -> Self {
        Self::new(Strategy::IosClassChain, selector)
    }

    pub fn ios_predicate(selector: impl Into<String>) -> Self {
        Self::new(Strategy::IosPredicate, selector)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.strategy.as_wire(), self.selector)
    }
}

/// The Android and iOS locators for one logical UI element.
///
/// Exactly one of the two is active per session; resolution happens against
/// a platform fixed at configuration load, so there is no per-call
/// ambiguity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLocator {
    pub android: Locator,
    pub ios: Locator,
}

impl PlatformLocator {
    pub fn new(android: Locator, ios: Locator) -> Self {
        Self { android, ios }
    }

    /// Both platforms share the same locator (common for accessibility ids).
    pub fn same(locator: Locator) -> Self {
        Self {
            android: locator.clone(),
            ios: locator,
        }
    }

    /// The locator for the given platform.
    pub fn resolved(&self, platform: Platform) -> &Locator {
        match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
        }
    }
}
