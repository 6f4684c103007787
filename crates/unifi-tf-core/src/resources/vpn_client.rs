// ── unifi_vpn_client ──
//
// Outbound VPN tunnels (`purpose = "vpn-client"`) in `rest/networkconf`.
// The WireGuard private key is write-only.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::VpnClient;
use unifi_tf_api::legacy::networks::VPN_CLIENT_PURPOSE;

use crate::convert;
use crate::error::CoreError;
use crate::kind::{ResourceKind, TrackedModel};
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

const DEFAULT_VPN_TYPE: &str = "wireguard-client";

merge_fields!(VpnClient {
    id,
    site_id,
    name,
    purpose,
    enabled,
    vpn_type,
    ip_subnet,
    vpn_client_default_route,
    vpn_client_pull_dns,
    wireguard_client_peer_ip,
    wireguard_client_peer_port,
    wireguard_client_peer_public_key,
    wireguard_client_preshared_key_enabled,
    x_wireguard_private_key,
    dns,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnClientModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub name: Value<String>,
    pub enabled: Value<bool>,
    pub vpn_type: Value<String>,
    pub subnet: Value<String>,
    pub default_route: Value<bool>,
    pub pull_dns: Value<bool>,
    pub peer_ip: Value<String>,
    pub peer_port: Value<i64>,
    pub peer_public_key: Value<String>,
    pub preshared_key_enabled: Value<bool>,
    /// Write-only.
    pub private_key: Value<String>,
    pub dns: Value<Vec<String>>,
    pub allow_existing: Value<bool>,
}

overlay_fields!(VpnClientModel {
    id,
    site,
    name,
    enabled,
    vpn_type,
    subnet,
    default_route,
    pull_dns,
    peer_ip,
    peer_port,
    peer_public_key,
    preshared_key_enabled,
    private_key,
    dns,
    allow_existing,
});

impl TrackedModel for VpnClientModel {
    fn id(&self) -> &Value<String> {
        &self.id
    }

    fn site(&self) -> &Value<String> {
        &self.site
    }

    fn allow_existing(&self) -> bool {
        convert::is_set(&self.allow_existing)
    }
}

pub struct VpnClientKind;

impl ResourceKind for VpnClientKind {
    const TYPE_NAME: &'static str = "unifi_vpn_client";
    type Model = VpnClientModel;
    type Object = VpnClient;

    fn object_id(object: &VpnClient) -> &str {
        &object.id
    }

    fn object_natural_key(object: &VpnClient) -> Option<String> {
        Some(object.name.clone()).filter(|n| !n.is_empty())
    }

    fn model_natural_key(model: &VpnClientModel) -> Option<String> {
        model.name.as_known().filter(|n| !n.is_empty()).cloned()
    }

    fn to_remote(model: &VpnClientModel) -> Result<VpnClient, CoreError> {
        if model.id.as_known().is_none() && Self::model_natural_key(model).is_none() {
            return Err(CoreError::validation(Self::TYPE_NAME, "name is required"));
        }
        if let Some(port) = model.peer_port.as_known() {
            if !(1..=65_535).contains(port) {
                return Err(CoreError::validation(
                    Self::TYPE_NAME,
                    format!("peer_port {port} is out of range"),
                ));
            }
        }

        Ok(VpnClient {
            id: convert::wire_string(&model.id),
            name: convert::wire_string(&model.name),
            purpose: VPN_CLIENT_PURPOSE.to_owned(),
            enabled: convert::wire_opt(&model.enabled),
            vpn_type: convert::wire_string(&model.vpn_type),
            ip_subnet: convert::wire_string(&model.subnet),
            vpn_client_default_route: convert::wire_opt(&model.default_route),
            vpn_client_pull_dns: convert::wire_opt(&model.pull_dns),
            wireguard_client_peer_ip: convert::wire_string(&model.peer_ip),
            wireguard_client_peer_port: convert::wire_opt(&model.peer_port),
            wireguard_client_peer_public_key: convert::wire_string(&model.peer_public_key),
            wireguard_client_preshared_key_enabled: convert::wire_opt(&model.preshared_key_enabled),
            x_wireguard_private_key: convert::wire_string(&model.private_key),
            dns: convert::wire_list(&model.dns),
            ..VpnClient::default()
        })
    }

    fn prepare_create(object: &mut VpnClient) -> Result<(), CoreError> {
        if object.vpn_type.is_empty() {
            object.vpn_type = DEFAULT_VPN_TYPE.to_owned();
        }
        Ok(())
    }

    fn from_remote(object: &VpnClient, prior: &VpnClientModel, site: &str) -> VpnClientModel {
        VpnClientModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            name: convert::string(&object.name),
            enabled: convert::flag(object.enabled),
            vpn_type: convert::string(&object.vpn_type),
            subnet: convert::string(&object.ip_subnet),
            default_route: convert::flag(object.vpn_client_default_route),
            pull_dns: convert::flag(object.vpn_client_pull_dns),
            peer_ip: convert::string(&object.wireguard_client_peer_ip),
            peer_port: convert::int(object.wireguard_client_peer_port),
            peer_public_key: convert::string(&object.wireguard_client_peer_public_key),
            preshared_key_enabled: convert::flag(object.wireguard_client_preshared_key_enabled),
            private_key: convert::write_only(&prior.private_key),
            dns: convert::list(&object.dns),
            allow_existing: prior.allow_existing.clone(),
        }
    }
}
