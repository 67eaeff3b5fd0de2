//! Session capability builders for Android and iOS.
//!
//! Capabilities are the key/value parameters negotiated with the Appium
//! server when a session is opened. Building them is a pure function of the
//! [`Config`]: no side effects, deterministic output. Vendor-specific keys
//! carry the `appium:` prefix required by the W3C protocol; the Perfecto
//! security token is included only when the configured provider needs it.

use serde_json::{json, Map, Value};

use crate::config::{CloudProvider, Config, Platform};

/// Build the capability map for the configured platform.
pub fn for_platform(config: &Config) -> Map<String, Value> {
    match config.platform {
        Platform::Android => android(config),
        Platform::Ios => ios(config),
    }
}

/// Android session capabilities (UiAutomator2).
pub fn android(config: &Config) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert("platformName".into(), json!("Android"));
    caps.insert("appium:automationName".into(), json!("UiAutomator2"));
    caps.insert(
        "appium:platformVersion".into(),
        json!(config.android_platform_version),
    );
    caps.insert("appium:deviceName".into(), json!(config.android_device_name));
    caps.insert("appium:appPackage".into(), json!(config.android_app_package));
    caps.insert(
        "appium:appActivity".into(),
        json!(config.android_app_activity),
    );
    caps.insert(
        "appium:newCommandTimeout".into(),
        json!(config.command_timeout.as_secs()),
    );
    caps.insert("appium:autoGrantPermissions".into(), json!(true));
    caps.insert("appium:noReset".into(), json!(false));
    insert_cloud_auth(config, &mut caps);
    caps
}

/// iOS session capabilities (XCUITest).
pub fn ios(config: &Config) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert("platformName".into(), json!("iOS"));
    caps.insert("appium:automationName".into(), json!("XCUITest"));
    caps.insert(
        "appium:platformVersion".into(),
        json!(config.ios_platform_version),
    );
    caps.insert("appium:deviceName".into(), json!(config.ios_device_name));
    caps.insert("appium:bundleId".into(), json!(config.ios_bundle_id));
    caps.insert(
        "appium:newCommandTimeout".into(),
        json!(config.command_timeout.as_secs()),
    );
    caps.insert("appium:autoAcceptAlerts".into(), json!(true));
    caps.insert("appium:noReset".into(), json!(false));
    insert_cloud_auth(config, &mut caps);
    caps
}

fn insert_cloud_auth(config: &Config, caps: &mut Map<String, Value>) {
    if config.cloud_provider == CloudProvider::Perfecto {
        if let Some(token) = &config.perfecto_security_token {
            caps.insert("perfecto:securityToken".into(), json!(token));
        }
    }
}
