// ── unifi_client ──
//
// Known-client records (`rest/user`), keyed by MAC. The controller creates
// a record on its own the first time a device connects, so claiming an
// existing MAC is the normal path rather than a conflict. Removal is a
// `forget-sta` by MAC, not a REST delete.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::ClientUser;

use crate::convert;
use crate::error::CoreError;
use crate::kind::{Capabilities, DeleteMode, ResourceKind, TrackedModel};
use crate::merge::MergePolicy;
use crate::model::{MacAddress, Value};
use crate::{merge_fields, overlay_fields};

merge_fields!(ClientUser {
    id,
    site_id,
    mac,
    name,
    note,
    hostname,
    usergroup_id,
    use_fixedip,
    fixed_ip,
    network_id,
    blocked,
    dev_id_override,
    local_dns_record,
    local_dns_record_enabled,
    first_seen,
    last_seen,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub mac: Value<String>,
    pub name: Value<String>,
    pub note: Value<String>,
    /// Computed.
    pub hostname: Value<String>,
    pub user_group_id: Value<String>,
    pub fixed_ip: Value<String>,
    pub network_id: Value<String>,
    pub blocked: Value<bool>,
    pub dev_id_override: Value<i64>,
    pub local_dns_record: Value<String>,
    pub allow_existing: Value<bool>,
    pub skip_forget_on_destroy: Value<bool>,
}

overlay_fields!(ClientModel {
    id,
    site,
    mac,
    name,
    note,
    hostname,
    user_group_id,
    fixed_ip,
    network_id,
    blocked,
    dev_id_override,
    local_dns_record,
    allow_existing,
    skip_forget_on_destroy,
});

impl TrackedModel for ClientModel {
    fn id(&self) -> &Value<String> {
        &self.id
    }

    fn site(&self) -> &Value<String> {
        &self.site
    }

    fn allow_existing(&self) -> bool {
        convert::is_set(&self.allow_existing)
    }

    fn skip_delete(&self) -> bool {
        convert::is_set(&self.skip_forget_on_destroy)
    }
}

pub struct ClientKind;

impl ResourceKind for ClientKind {
    const TYPE_NAME: &'static str = "unifi_client";
    type Model = ClientModel;
    type Object = ClientUser;

    fn capabilities() -> Capabilities {
        Capabilities {
            delete: DeleteMode::ByNaturalKey,
            ..Capabilities::default()
        }
    }

    fn merge_policy() -> MergePolicy {
        MergePolicy::default()
            .skip("first_seen")
            .skip("last_seen")
            .zero_meaningful("dev_id_override")
    }

    fn object_id(object: &ClientUser) -> &str {
        &object.id
    }

    fn object_natural_key(object: &ClientUser) -> Option<String> {
        Some(object.mac.as_str())
            .filter(|m| !m.is_empty())
            .map(|m| MacAddress::new(m).to_string())
    }

    fn model_natural_key(model: &ClientModel) -> Option<String> {
        model
            .mac
            .as_known()
            .filter(|m| !m.is_empty())
            .map(|m| MacAddress::new(m).to_string())
    }

    /// Clients are keyed by MAC, so names go by alias or reported hostname.
    fn matches_name(object: &ClientUser, name: &str) -> bool {
        !name.is_empty() && (object.name == name || object.hostname == name)
    }

    fn to_remote(model: &ClientModel) -> Result<ClientUser, CoreError> {
        let mac = match model.mac.as_known() {
            Some(raw) => MacAddress::parse(raw).ok_or_else(|| {
                CoreError::validation(Self::TYPE_NAME, format!("{raw:?} is not a MAC address"))
            })?,
            None if model.id.is_known() => MacAddress::new(""),
            None => return Err(CoreError::validation(Self::TYPE_NAME, "mac is required")),
        };

        let fixed_ip = convert::wire_string(&model.fixed_ip);
        let dns_record = convert::wire_string(&model.local_dns_record);
        if !fixed_ip.is_empty() && model.network_id.is_null() {
            return Err(CoreError::validation(
                Self::TYPE_NAME,
                "fixed_ip requires network_id",
            ));
        }

        Ok(ClientUser {
            id: convert::wire_string(&model.id),
            mac: mac.to_string(),
            name: convert::wire_string(&model.name),
            note: convert::wire_string(&model.note),
            usergroup_id: convert::wire_string(&model.user_group_id),
            use_fixedip: model.fixed_ip.is_known().then_some(!fixed_ip.is_empty()),
            fixed_ip,
            network_id: convert::wire_string(&model.network_id),
            blocked: convert::wire_opt(&model.blocked),
            dev_id_override: convert::wire_opt(&model.dev_id_override),
            local_dns_record_enabled: model
                .local_dns_record
                .is_known()
                .then_some(!dns_record.is_empty()),
            local_dns_record: dns_record,
            ..ClientUser::default()
        })
    }

    fn from_remote(object: &ClientUser, prior: &ClientModel, site: &str) -> ClientModel {
        let fixed_ip = if object.use_fixedip == Some(true) {
            convert::string(&object.fixed_ip)
        } else {
            Value::Null
        };
        let dns_record = if object.local_dns_record_enabled == Some(true) {
            convert::string(&object.local_dns_record)
        } else {
            Value::Null
        };

        ClientModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            mac: Self::object_natural_key(object).map_or(Value::Null, Value::Known),
            name: convert::string(&object.name),
            note: convert::string(&object.note),
            hostname: convert::string(&object.hostname),
            user_group_id: convert::string(&object.usergroup_id),
            fixed_ip,
            network_id: convert::string(&object.network_id),
            blocked: convert::flag(object.blocked),
            dev_id_override: convert::int_zero_ok(object.dev_id_override),
            local_dns_record: dns_record,
            allow_existing: prior.allow_existing.clone(),
            skip_forget_on_destroy: prior.skip_forget_on_destroy.clone(),
        }
    }
}
