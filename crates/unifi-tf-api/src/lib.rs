// unifi-tf-api: Async client for the UniFi controller's legacy REST API
//
// Covers the object endpoints a declarative provider needs: networkconf,
// wlanconf, user, portforward, site manager, and site settings. Every call
// takes the target site explicitly; nothing here caches or retries.

pub mod auth;
pub mod error;
pub mod legacy;
pub mod transport;

pub use auth::ControllerPlatform;
pub use error::Error;
pub use legacy::LegacyClient;
pub use transport::{TlsMode, TransportConfig};
