// ── unifi_wan ──
//
// WAN uplinks (`purpose = "wan"`) in `rest/networkconf`. Failover priority
// and egress QoS both treat 0 as a real setting.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::{Wan, WanProviderCapabilities};
use unifi_tf_api::legacy::networks::WAN_PURPOSE;

use crate::convert;
use crate::error::CoreError;
use crate::kind::{ResourceKind, TrackedModel};
use crate::merge::MergePolicy;
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

merge_fields!(WanProviderCapabilities {
    download_kilobits_per_second,
    upload_kilobits_per_second,
});

merge_fields!(Wan {
    id,
    site_id,
    attr_hidden_id,
    attr_no_delete,
    name,
    purpose,
    wan_networkgroup,
    wan_type,
    wan_ip,
    wan_netmask,
    wan_gateway,
    wan_dns1,
    wan_dns2,
    wan_username,
    x_wan_password,
    wan_vlan_enabled,
    wan_vlan,
    wan_egress_qos,
    wan_load_balance_type,
    wan_load_balance_weight,
    wan_failover_priority,
    wan_smartq_enabled,
    wan_provider_capabilities,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub name: Value<String>,
    pub network_group: Value<String>,
    pub wan_type: Value<String>,
    pub ip: Value<String>,
    pub netmask: Value<String>,
    pub gateway: Value<String>,
    pub dns: Value<Vec<String>>,
    pub username: Value<String>,
    /// Write-only.
    pub password: Value<String>,
    pub vlan: Value<i64>,
    pub egress_qos: Value<i64>,
    pub load_balance_type: Value<String>,
    pub load_balance_weight: Value<i64>,
    pub failover_priority: Value<i64>,
    pub smart_queue_enabled: Value<bool>,
    pub download_kbps: Value<i64>,
    pub upload_kbps: Value<i64>,
    pub allow_existing: Value<bool>,
}

overlay_fields!(WanModel {
    id,
    site,
    name,
    network_group,
    wan_type,
    ip,
    netmask,
    gateway,
    dns,
    username,
    password,
    vlan,
    egress_qos,
    load_balance_type,
    load_balance_weight,
    failover_priority,
    smart_queue_enabled,
    download_kbps,
    upload_kbps,
    allow_existing,
});

impl TrackedModel for WanModel {
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

pub struct WanKind;

impl ResourceKind for WanKind {
    const TYPE_NAME: &'static str = "unifi_wan";
    type Model = WanModel;
    type Object = Wan;

    fn merge_policy() -> MergePolicy {
        MergePolicy::default()
            .zero_meaningful("wan_egress_qos")
            .zero_meaningful("wan_failover_priority")
    }

    fn object_id(object: &Wan) -> &str {
        &object.id
    }

    fn object_natural_key(object: &Wan) -> Option<String> {
        Some(object.name.clone()).filter(|n| !n.is_empty())
    }

    fn model_natural_key(model: &WanModel) -> Option<String> {
        model.name.as_known().filter(|n| !n.is_empty()).cloned()
    }

    fn to_remote(model: &WanModel) -> Result<Wan, CoreError> {
        if model.id.as_known().is_none() && Self::model_natural_key(model).is_none() {
            return Err(CoreError::validation(Self::TYPE_NAME, "name is required"));
        }

        let dns = convert::wire_list(&model.dns);
        let mut dns_iter = dns.iter().cloned();
        let capabilities = (model.download_kbps.is_known() || model.upload_kbps.is_known())
            .then(|| WanProviderCapabilities {
                download_kilobits_per_second: convert::wire_opt(&model.download_kbps),
                upload_kilobits_per_second: convert::wire_opt(&model.upload_kbps),
            });

        Ok(Wan {
            id: convert::wire_string(&model.id),
            name: convert::wire_string(&model.name),
            purpose: WAN_PURPOSE.to_owned(),
            wan_networkgroup: convert::wire_string(&model.network_group),
            wan_type: convert::wire_string(&model.wan_type),
            wan_ip: convert::wire_string(&model.ip),
            wan_netmask: convert::wire_string(&model.netmask),
            wan_gateway: convert::wire_string(&model.gateway),
            wan_dns1: dns_iter.next().unwrap_or_default(),
            wan_dns2: dns_iter.next().unwrap_or_default(),
            wan_username: convert::wire_string(&model.username),
            x_wan_password: convert::wire_string(&model.password),
            wan_vlan_enabled: model.vlan.as_known().map(|v| *v != 0),
            wan_vlan: convert::wire_opt(&model.vlan),
            wan_egress_qos: convert::wire_opt(&model.egress_qos),
            wan_load_balance_type: convert::wire_string(&model.load_balance_type),
            wan_load_balance_weight: convert::wire_opt(&model.load_balance_weight),
            wan_failover_priority: convert::wire_opt(&model.failover_priority),
            wan_smartq_enabled: convert::wire_opt(&model.smart_queue_enabled),
            wan_provider_capabilities: capabilities,
            ..Wan::default()
        })
    }

    fn from_remote(object: &Wan, prior: &WanModel, site: &str) -> WanModel {
        let dns: Vec<String> = [&object.wan_dns1, &object.wan_dns2]
            .into_iter()
            .filter(|d| !d.is_empty())
            .cloned()
            .collect();
        let caps = object.wan_provider_capabilities.clone().unwrap_or_default();

        WanModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            name: convert::string(&object.name),
            network_group: convert::string(&object.wan_networkgroup),
            wan_type: convert::string(&object.wan_type),
            ip: convert::string(&object.wan_ip),
            netmask: convert::string(&object.wan_netmask),
            gateway: convert::string(&object.wan_gateway),
            dns: convert::list(&dns),
            username: convert::string(&object.wan_username),
            password: convert::write_only(&prior.password),
            vlan: if object.wan_vlan_enabled == Some(true) {
                convert::int(object.wan_vlan)
            } else {
                Value::Null
            },
            egress_qos: convert::int_zero_ok(object.wan_egress_qos),
            load_balance_type: convert::string(&object.wan_load_balance_type),
            load_balance_weight: convert::int(object.wan_load_balance_weight),
            failover_priority: convert::int_zero_ok(object.wan_failover_priority),
            smart_queue_enabled: convert::flag(object.wan_smartq_enabled),
            download_kbps: convert::int(caps.download_kilobits_per_second),
            upload_kbps: convert::int(caps.upload_kilobits_per_second),
            allow_existing: prior.allow_existing.clone(),
        }
    }
}
