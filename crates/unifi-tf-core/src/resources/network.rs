// ── unifi_network ──
//
// LAN-side networks (`purpose` corporate / guest / vlan-only) in
// `rest/networkconf`, keyed by name. VLAN 0 is a real value.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::Network;

use crate::convert;
use crate::error::CoreError;
use crate::kind::{ResourceKind, TrackedModel};
use crate::merge::MergePolicy;
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

const DEFAULT_PURPOSE: &str = "corporate";

merge_fields!(Network {
    id,
    site_id,
    attr_hidden_id,
    attr_no_delete,
    name,
    purpose,
    enabled,
    vlan,
    vlan_enabled,
    ip_subnet,
    networkgroup,
    domain_name,
    dhcpd_enabled,
    dhcpd_start,
    dhcpd_stop,
    dhcpd_leasetime,
    dhcpd_dns_enabled,
    dhcpd_dns_1,
    dhcpd_dns_2,
    igmp_snooping,
    internet_access_enabled,
    network_isolation_enabled,
    ipv6_interface_type,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub name: Value<String>,
    pub purpose: Value<String>,
    pub enabled: Value<bool>,
    pub vlan_id: Value<i64>,
    pub subnet: Value<String>,
    pub network_group: Value<String>,
    pub domain_name: Value<String>,
    pub dhcp_enabled: Value<bool>,
    pub dhcp_start: Value<String>,
    pub dhcp_stop: Value<String>,
    pub dhcp_lease: Value<i64>,
    pub dhcp_dns: Value<Vec<String>>,
    pub igmp_snooping: Value<bool>,
    pub internet_access_enabled: Value<bool>,
    pub network_isolation_enabled: Value<bool>,
    pub ipv6_interface_type: Value<String>,
    pub allow_existing: Value<bool>,
}

overlay_fields!(NetworkModel {
    id,
    site,
    name,
    purpose,
    enabled,
    vlan_id,
    subnet,
    network_group,
    domain_name,
    dhcp_enabled,
    dhcp_start,
    dhcp_stop,
    dhcp_lease,
    dhcp_dns,
    igmp_snooping,
    internet_access_enabled,
    network_isolation_enabled,
    ipv6_interface_type,
    allow_existing,
});

impl TrackedModel for NetworkModel {
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

pub struct NetworkKind;

impl ResourceKind for NetworkKind {
    const TYPE_NAME: &'static str = "unifi_network";
    type Model = NetworkModel;
    type Object = Network;

    fn merge_policy() -> MergePolicy {
        MergePolicy::default().zero_meaningful("vlan")
    }

    fn object_id(object: &Network) -> &str {
        &object.id
    }

    fn object_natural_key(object: &Network) -> Option<String> {
        Some(object.name.clone()).filter(|n| !n.is_empty())
    }

    fn model_natural_key(model: &NetworkModel) -> Option<String> {
        model.name.as_known().filter(|n| !n.is_empty()).cloned()
    }

    fn to_remote(model: &NetworkModel) -> Result<Network, CoreError> {
        if model.id.as_known().is_none() && Self::model_natural_key(model).is_none() {
            return Err(CoreError::validation(Self::TYPE_NAME, "name is required"));
        }

        let dns = convert::wire_list(&model.dhcp_dns);
        let mut dns_iter = dns.iter().cloned();

        Ok(Network {
            id: convert::wire_string(&model.id),
            name: convert::wire_string(&model.name),
            purpose: convert::wire_string(&model.purpose),
            enabled: convert::wire_opt(&model.enabled),
            vlan: convert::wire_opt(&model.vlan_id),
            vlan_enabled: model.vlan_id.as_known().map(|v| *v != 0),
            ip_subnet: convert::wire_string(&model.subnet),
            networkgroup: convert::wire_string(&model.network_group),
            domain_name: convert::wire_string(&model.domain_name),
            dhcpd_enabled: convert::wire_opt(&model.dhcp_enabled),
            dhcpd_start: convert::wire_string(&model.dhcp_start),
            dhcpd_stop: convert::wire_string(&model.dhcp_stop),
            dhcpd_leasetime: convert::wire_opt(&model.dhcp_lease),
            dhcpd_dns_enabled: model.dhcp_dns.as_known().map(|d| !d.is_empty()),
            dhcpd_dns_1: dns_iter.next().unwrap_or_default(),
            dhcpd_dns_2: dns_iter.next().unwrap_or_default(),
            igmp_snooping: convert::wire_opt(&model.igmp_snooping),
            internet_access_enabled: convert::wire_opt(&model.internet_access_enabled),
            network_isolation_enabled: convert::wire_opt(&model.network_isolation_enabled),
            ipv6_interface_type: convert::wire_string(&model.ipv6_interface_type),
            ..Network::default()
        })
    }

    fn prepare_create(object: &mut Network) -> Result<(), CoreError> {
        if object.purpose.is_empty() {
            object.purpose = DEFAULT_PURPOSE.to_owned();
        }
        Ok(())
    }

    fn from_remote(object: &Network, prior: &NetworkModel, site: &str) -> NetworkModel {
        let dns: Vec<String> = [&object.dhcpd_dns_1, &object.dhcpd_dns_2]
            .into_iter()
            .filter(|d| !d.is_empty())
            .cloned()
            .collect();

        NetworkModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            name: convert::string(&object.name),
            purpose: convert::string(&object.purpose),
            enabled: convert::flag(object.enabled),
            vlan_id: convert::int_zero_ok(object.vlan),
            subnet: convert::string(&object.ip_subnet),
            network_group: convert::string(&object.networkgroup),
            domain_name: convert::string(&object.domain_name),
            dhcp_enabled: convert::flag(object.dhcpd_enabled),
            dhcp_start: convert::string(&object.dhcpd_start),
            dhcp_stop: convert::string(&object.dhcpd_stop),
            dhcp_lease: convert::int(object.dhcpd_leasetime),
            dhcp_dns: convert::list(&dns),
            igmp_snooping: convert::flag(object.igmp_snooping),
            internet_access_enabled: convert::flag(object.internet_access_enabled),
            network_isolation_enabled: convert::flag(object.network_isolation_enabled),
            ipv6_interface_type: convert::string(&object.ipv6_interface_type),
            allow_existing: prior.allow_existing.clone(),
        }
    }
}
