//! Framework configuration resolved from environment variables.
//!
//! All settings are read once at startup with documented defaults and are
//! immutable afterwards. The platform value fails fast: anything other than
//! `android` or `ios` aborts the run before a session is ever opened.
//!
//! # Example
//!
//! ```no_run
//! use appilot_core::config::Config;
//!
//! let config = Config::from_env().expect("invalid configuration");
//! if config.is_android() {
//!     println!("targeting {}", config.android_device_name);
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const DEFAULT_APPIUM_SERVER_URL: &str = "http://127.0.0.1:4723";
const DEFAULT_PERFECTO_SERVER_URL: &str =
    "https://trial.perfectomobile.com/nexperience/perfectomobile/wd/hub";

/// Errors raised while resolving configuration. All of them are fatal: a
/// misconfigured run is aborted before any session is opened.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `PLATFORM` was set to something other than `android` or `ios`.
    #[error("unsupported platform '{0}' (expected 'android' or 'ios')")]
    InvalidPlatform(String),

    /// `CLOUD_PROVIDER` was set to something other than `local` or `perfecto`.
    #[error("unsupported cloud provider '{0}' (expected 'local' or 'perfecto')")]
    InvalidProvider(String),

    /// A timeout variable did not parse as whole seconds.
    #[error("invalid value '{value}' for {var}: expected whole seconds")]
    InvalidDuration { var: &'static str, value: String },

    /// A server URL variable did not parse as a URL.
    #[error("invalid URL for {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

/// Supported mobile platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// The `platformName` capability value for this platform.
    pub fn capability_name(self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(ConfigError::InvalidPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

/// Where the Appium endpoint lives: a local server or the Perfecto device lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudProvider {
    Local,
    Perfecto,
}

impl FromStr for CloudProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(CloudProvider::Local),
            "perfecto" => Ok(CloudProvider::Perfecto),
            other => Err(ConfigError::InvalidProvider(other.to_string())),
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudProvider::Local => write!(f, "local"),
            CloudProvider::Perfecto => write!(f, "perfecto"),
        }
    }
}

/// Immutable framework settings, resolved once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// The platform every session in this run targets.
    pub platform: Platform,
    /// Which Appium endpoint to talk to.
    pub cloud_provider: CloudProvider,
    /// Local Appium server URL.
    pub appium_server_url: Url,
    /// Perfecto cloud server URL.
    pub perfecto_server_url: Url,
    /// Perfecto security token, sent as a capability when the provider is
    /// [`CloudProvider::Perfecto`].
    pub perfecto_security_token: Option<String>,

    /// Server-side implicit wait applied at session start.
    pub implicit_wait: Duration,
    /// Default bound for action-layer explicit waits.
    pub explicit_wait: Duration,
    /// Per-command HTTP timeout and `newCommandTimeout` capability.
    pub command_timeout: Duration,

    pub android_device_name: String,
    pub android_platform_version: String,
    pub android_app_package: String,
    pub android_app_activity: String,

    pub ios_device_name: String,
    pub ios_platform_version: String,
    pub ios_bundle_id: String,

    /// Credentials used by the login scenarios.
    pub test_username: String,
    pub test_password: String,

    /// Run log files land here, one timestamped file per run.
    pub logs_dir: PathBuf,
    /// Failure screenshots land here.
    pub screenshots_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let platform = match lookup("PLATFORM") {
            Some(raw) => raw.parse()?,
            None => Platform::Android,
        };
        let cloud_provider = match lookup("CLOUD_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => CloudProvider::Local,
        };

        let reports_dir = PathBuf::from("reports");
        Ok(Self {
            platform,
            cloud_provider,
            appium_server_url: url_var(&lookup, "APPIUM_SERVER_URL", DEFAULT_APPIUM_SERVER_URL)?,
            perfecto_server_url: url_var(
                &lookup,
                "PERFECTO_SERVER_URL",
                DEFAULT_PERFECTO_SERVER_URL,
            )?,
            perfecto_security_token: lookup("PERFECTO_SECURITY_TOKEN").filter(|t| !t.is_empty()),
            implicit_wait: seconds_var(&lookup, "IMPLICIT_WAIT", 10)?,
            explicit_wait: seconds_var(&lookup, "EXPLICIT_WAIT", 20)?,
            command_timeout: seconds_var(&lookup, "COMMAND_TIMEOUT", 120)?,
            android_device_name: string_var(&lookup, "ANDROID_DEVICE_NAME", "emulator-5554"),
            android_platform_version: string_var(&lookup, "ANDROID_PLATFORM_VERSION", "13.0"),
            android_app_package: "com.saucelabs.mydemoapp.android".to_string(),
            android_app_activity:
                "com.saucelabs.mydemoapp.android.view.activities.MainActivity".to_string(),
            ios_device_name: string_var(&lookup, "IOS_DEVICE_NAME", "iPhone 14"),
            ios_platform_version: string_var(&lookup, "IOS_PLATFORM_VERSION", "16.0"),
            ios_bundle_id: "com.saucelabs.mydemoapp.ios".to_string(),
            test_username: string_var(&lookup, "TEST_USERNAME", "bob@example.com"),
            test_password: string_var(&lookup, "TEST_PASSWORD", "10203040"),
            logs_dir: PathBuf::from("logs"),
            screenshots_dir: reports_dir.join("screenshots"),
        })
    }

    /// The Appium endpoint for the configured provider.
    pub fn server_url(&self) -> &Url {
        match self.cloud_provider {
            CloudProvider::Local => &self.appium_server_url,
            CloudProvider::Perfecto => &self.perfecto_server_url,
        }
    }

    pub fn is_android(&self) -> bool {
        self.platform == Platform::Android
    }

    pub fn is_ios(&self) -> bool {
        self.platform == Platform::Ios
    }
}

fn string_var(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: &str) -> String {
    lookup(var).unwrap_or_else(|| default.to_string())
}

fn seconds_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidDuration { var, value: raw }),
        None => Ok(Duration::from_secs(default)),
    }
}

fn url_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}
