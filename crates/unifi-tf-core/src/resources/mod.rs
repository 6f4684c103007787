// ── Resource kind catalogue ──
//
// One module per declarative resource type. Each declares its model, the
// merge rules for its wire object, and the adapters between them.

pub mod client;
pub mod network;
pub mod port_forward;
pub mod setting_mgmt;
pub mod site;
pub mod vpn_client;
pub mod wan;
pub mod wlan;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::kind::{Capabilities, ResourceKind};
use crate::merge::MergePolicy;

pub use client::{ClientKind, ClientModel};
pub use network::{NetworkKind, NetworkModel};
pub use port_forward::{PortForwardKind, PortForwardModel};
pub use setting_mgmt::{SettingMgmtKind, SettingMgmtModel};
pub use site::{SiteKind, SiteModel};
pub use vpn_client::{VpnClientKind, VpnClientModel};
pub use wan::{WanKind, WanModel};
pub use wlan::{WlanKind, WlanModel};

/// Every supported resource type, by its declarative type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ResourceType {
    #[strum(serialize = "unifi_network")]
    Network,
    #[strum(serialize = "unifi_wan")]
    Wan,
    #[strum(serialize = "unifi_vpn_client")]
    VpnClient,
    #[strum(serialize = "unifi_wlan")]
    Wlan,
    #[strum(serialize = "unifi_client")]
    Client,
    #[strum(serialize = "unifi_port_forward")]
    PortForward,
    #[strum(serialize = "unifi_site")]
    Site,
    #[strum(serialize = "unifi_setting_mgmt")]
    SettingMgmt,
}

/// Evaluate `body` with `$k` bound to the [`ResourceKind`] behind a
/// runtime [`ResourceType`].
///
/// ```ignore
/// let caps = with_resource_kind!(rt, K => K::capabilities());
/// ```
#[macro_export]
macro_rules! with_resource_kind {
    ($rt:expr, $k:ident => $body:expr) => {
        match $rt {
            $crate::resources::ResourceType::Network => {
                type $k = $crate::resources::NetworkKind;
                $body
            }
            $crate::resources::ResourceType::Wan => {
                type $k = $crate::resources::WanKind;
                $body
            }
            $crate::resources::ResourceType::VpnClient => {
                type $k = $crate::resources::VpnClientKind;
                $body
            }
            $crate::resources::ResourceType::Wlan => {
                type $k = $crate::resources::WlanKind;
                $body
            }
            $crate::resources::ResourceType::Client => {
                type $k = $crate::resources::ClientKind;
                $body
            }
            $crate::resources::ResourceType::PortForward => {
                type $k = $crate::resources::PortForwardKind;
                $body
            }
            $crate::resources::ResourceType::Site => {
                type $k = $crate::resources::SiteKind;
                $body
            }
            $crate::resources::ResourceType::SettingMgmt => {
                type $k = $crate::resources::SettingMgmtKind;
                $body
            }
        }
    };
}

impl ResourceType {
    pub fn type_name(self) -> &'static str {
        self.into()
    }

    pub fn capabilities(self) -> Capabilities {
        crate::with_resource_kind!(self, K => K::capabilities())
    }

    pub fn merge_policy(self) -> MergePolicy {
        crate::with_resource_kind!(self, K => K::merge_policy())
    }

    /// Whether Create may absorb an existing object on a key collision.
    pub fn supports_allow_existing(self) -> bool {
        matches!(
            self,
            Self::Network | Self::Wan | Self::VpnClient | Self::Wlan | Self::Client
        )
    }
}
