// Legacy API object types
//
// Wire models for the objects a declarative provider manages. All responses
// are wrapped in the `LegacyResponse<T>` envelope. Every object carries a
// flattened `extra` map: the controller expects full-object PUTs, so fields
// we don't model must round-trip untouched.
//
// Conventions: strings are plain `String` and omitted when empty, optional
// scalars are `Option<_>` and omitted when `None`. The merge engine in
// `unifi-tf-core` relies on "empty means unset" for both shapes.

use serde::{Deserialize, Serialize};

type Extra = serde_json::Map<String, serde_json::Value>;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard UniFi legacy API response envelope.
///
/// Every legacy endpoint wraps its payload:
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct LegacyResponse<T> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Metadata from the legacy envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

// ── Network (networkconf: corporate / guest / vlan-only) ─────────────

/// LAN-side network from `rest/networkconf`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_hidden_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_no_delete: Option<bool>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// `corporate`, `guest` or `vlan-only`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// VLAN tag; 0 is a valid "untagged" value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_subnet: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub networkgroup: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcpd_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dhcpd_start: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dhcpd_stop: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcpd_leasetime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcpd_dns_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dhcpd_dns_1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dhcpd_dns_2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub igmp_snooping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_access_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_isolation_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv6_interface_type: String,

    #[serde(flatten)]
    pub extra: Extra,
}

// ── WAN (networkconf purpose "wan") ──────────────────────────────────

/// WAN uplink from `rest/networkconf`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wan {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_hidden_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_no_delete: Option<bool>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,
    /// `WAN`, `WAN2`, ...
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_networkgroup: String,
    /// `dhcp`, `static` or `pppoe`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_ip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_netmask: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_gateway: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_dns1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_dns2: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x_wan_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_vlan_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_vlan: Option<i64>,
    /// 802.1p priority tag; 0 disables tagging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_egress_qos: Option<i64>,
    /// `failover-only` or `weighted`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wan_load_balance_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_load_balance_weight: Option<i64>,
    /// Failover order; 0 is the primary uplink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_failover_priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_smartq_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_provider_capabilities: Option<WanProviderCapabilities>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// ISP bandwidth declared for smart queues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WanProviderCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_kilobits_per_second: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_kilobits_per_second: Option<i64>,
}

// ── VPN client (networkconf purpose "vpn-client") ────────────────────

/// Outbound VPN tunnel from `rest/networkconf`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VpnClient {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// `wireguard-client` or `openvpn-client`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vpn_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_subnet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_client_default_route: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_client_pull_dns: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wireguard_client_peer_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireguard_client_peer_port: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wireguard_client_peer_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireguard_client_preshared_key_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x_wireguard_private_key: String,
    #[serde(default)]
    pub dns: Vec<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

// ── WLAN ─────────────────────────────────────────────────────────────

/// Wireless network from `rest/wlanconf`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wlan {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_hidden_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_no_delete: Option<bool>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// `open`, `wpapsk` or `wpaeap`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub security: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wpa_mode: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wpa_enc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x_passphrase: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub networkconf_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usergroup_id: String,
    #[serde(default)]
    pub ap_group_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_ssid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_guest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_isolation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uapsd_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_roaming_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pmf_mode: String,
    #[serde(default)]
    pub wlan_bands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_filter_enabled: Option<bool>,
    #[serde(default)]
    pub mac_filter_list: Vec<String>,
    /// `allow` or `deny`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mac_filter_policy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub minrate_setting_preference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minrate_ng_enabled: Option<bool>,
    /// 2.4 GHz minimum data rate; 0 means "no minimum".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minrate_ng_data_rate_kbps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minrate_na_enabled: Option<bool>,
    /// 5 GHz minimum data rate; 0 means "no minimum".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minrate_na_data_rate_kbps: Option<i64>,
    #[serde(default)]
    pub schedule_with_duration: Vec<WlanSchedule>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// One broadcast window of a scheduled WLAN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WlanSchedule {
    #[serde(default)]
    pub start_days_of_week: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

// ── Client (rest/user) ───────────────────────────────────────────────

/// Known-client record from `rest/user` and `stat/user/{mac}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientUser {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mac: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usergroup_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_fixedip: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fixed_ip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    /// Fingerprint override; 0 resets to automatic detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_id_override: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub local_dns_record: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dns_record_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<i64>,

    #[serde(flatten)]
    pub extra: Extra,
}

// ── Port forward ─────────────────────────────────────────────────────

/// Port-forward rule from `rest/portforward`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortForward {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// `wan`, `wan2` or `both`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pfwd_interface: String,
    /// Forward target IP.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fwd: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fwd_port: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dst_port: String,
    /// `tcp`, `udp` or `tcp_udp`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub proto: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,

    #[serde(flatten)]
    pub extra: Extra,
}

// ── Site ─────────────────────────────────────────────────────────────

/// Site from `self/sites`.
///
/// `name` is the controller-generated short name used in site-scoped URLs;
/// `desc` is the display name the user picks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_hidden_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr_no_delete: Option<bool>,

    #[serde(flatten)]
    pub extra: Extra,
}

// ── Settings: mgmt ───────────────────────────────────────────────────

/// Site management settings (`key = "mgmt"`), a per-site singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingMgmt {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_upgrade: Option<bool>,
    /// Hour of day (0-23) for automatic upgrades; midnight is 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_upgrade_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_feature_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_ssh_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_ssh_auth_password_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_ssh_bind_wildcard: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x_ssh_username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x_ssh_password: String,
    #[serde(default)]
    pub x_ssh_keys: Vec<SshKey>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// Authorized SSH public key for device access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// `ssh-rsa`, `ssh-ed25519`, ...
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub key_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}
