//! Page objects for the screens under test.
//!
//! Every page holds a clone of the [`MobileActions`](appilot_core::actions::MobileActions)
//! layer (cheap: it is an `Arc` around the driver) and exposes the screen's
//! elements and flows as named operations. Locators are declared as
//! [`PlatformLocator`](appilot_core::locator::PlatformLocator) pairs; the
//! active platform was fixed when the action layer was constructed, so no
//! page method ever tests the platform flag.

mod cart;
mod login;
mod product;
mod registration;
mod transfer;
mod welcome;

pub use cart::CartPage;
pub use login::LoginPage;
pub use product::ProductPage;
pub use registration::RegistrationPage;
pub use transfer::TransferPage;
pub use welcome::WelcomePage;
