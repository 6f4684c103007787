// Legacy API client modules
//
// The legacy API lives at `/api/s/{site}/` (or `/proxy/network/api/s/{site}/`
// on UniFi OS) and wraps every response in `{ meta: { rc, msg }, data: [] }`.

pub mod auth;
pub mod client;
pub mod models;
pub mod networks;
pub mod port_forwards;
pub mod rest;
pub mod settings;
pub mod sites;
pub mod users;
pub mod wlans;

pub use client::LegacyClient;
pub use rest::RestObject;
