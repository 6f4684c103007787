// `rest/networkconf` object types
//
// LAN networks, WAN uplinks and VPN clients share one collection and are
// told apart by `purpose`.

use crate::legacy::models::{Network, VpnClient, Wan};
use crate::legacy::rest::RestObject;

/// `purpose` values that make a networkconf entry a LAN-side network.
pub const NETWORK_PURPOSES: &[&str] = &["corporate", "guest", "vlan-only"];
pub const WAN_PURPOSE: &str = "wan";
pub const VPN_CLIENT_PURPOSE: &str = "vpn-client";

impl RestObject for Network {
    const COLLECTION: &'static str = "rest/networkconf";

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs(&self) -> bool {
        NETWORK_PURPOSES.contains(&self.purpose.as_str())
    }
}

impl RestObject for Wan {
    const COLLECTION: &'static str = "rest/networkconf";

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs(&self) -> bool {
        self.purpose == WAN_PURPOSE
    }
}

impl RestObject for VpnClient {
    const COLLECTION: &'static str = "rest/networkconf";

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs(&self) -> bool {
        self.purpose == VPN_CLIENT_PURPOSE
    }
}
