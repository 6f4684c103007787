// ── unifi_setting_mgmt ──
//
// Per-site management settings. The object always exists, so Create
// absorbs it and Delete only stops tracking it. `auto_upgrade_hour = 0`
// means midnight and must be sendable.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::{SettingMgmt, SshKey};

use crate::convert;
use crate::error::CoreError;
use crate::import::{self, ImportKey, ImportTarget};
use crate::kind::{Capabilities, CreateMode, DeleteMode, ReadMiss, ResourceKind, TrackedModel};
use crate::merge::MergePolicy;
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

/// `key` of the management settings document.
pub const SETTING_KEY: &str = "mgmt";

merge_fields!(SshKey {
    name,
    key_type,
    key,
    comment,
});

merge_fields!(SettingMgmt {
    id,
    site_id,
    key,
    auto_upgrade,
    auto_upgrade_hour,
    led_enabled,
    alert_enabled,
    advanced_feature_enabled,
    x_ssh_enabled,
    x_ssh_auth_password_enabled,
    x_ssh_bind_wildcard,
    x_ssh_username,
    x_ssh_password,
    x_ssh_keys,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKeyModel {
    pub name: String,
    #[serde(rename = "type")]
    pub key_type: String,
    pub key: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingMgmtModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub auto_upgrade: Value<bool>,
    pub auto_upgrade_hour: Value<i64>,
    pub led_enabled: Value<bool>,
    pub alert_enabled: Value<bool>,
    pub advanced_feature_enabled: Value<bool>,
    pub ssh_enabled: Value<bool>,
    pub ssh_auth_password_enabled: Value<bool>,
    pub ssh_bind_wildcard: Value<bool>,
    pub ssh_username: Value<String>,
    /// Write-only.
    pub ssh_password: Value<String>,
    pub ssh_keys: Value<Vec<SshKeyModel>>,
}

overlay_fields!(SettingMgmtModel {
    id,
    site,
    auto_upgrade,
    auto_upgrade_hour,
    led_enabled,
    alert_enabled,
    advanced_feature_enabled,
    ssh_enabled,
    ssh_auth_password_enabled,
    ssh_bind_wildcard,
    ssh_username,
    ssh_password,
    ssh_keys,
});

impl TrackedModel for SettingMgmtModel {
    fn id(&self) -> &Value<String> {
        &self.id
    }

    fn site(&self) -> &Value<String> {
        &self.site
    }
}

pub struct SettingMgmtKind;

impl ResourceKind for SettingMgmtKind {
    const TYPE_NAME: &'static str = "unifi_setting_mgmt";
    type Model = SettingMgmtModel;
    type Object = SettingMgmt;

    fn capabilities() -> Capabilities {
        Capabilities {
            create: CreateMode::Singleton,
            delete: DeleteMode::Disown,
            read_miss: ReadMiss::Error,
        }
    }

    fn merge_policy() -> MergePolicy {
        MergePolicy::default()
            .skip("key")
            .zero_meaningful("auto_upgrade_hour")
    }

    fn object_id(object: &SettingMgmt) -> &str {
        &object.id
    }

    fn object_natural_key(object: &SettingMgmt) -> Option<String> {
        Some(object.key.clone()).filter(|k| !k.is_empty())
    }

    fn model_natural_key(_model: &SettingMgmtModel) -> Option<String> {
        Some(SETTING_KEY.to_owned())
    }

    fn to_remote(model: &SettingMgmtModel) -> Result<SettingMgmt, CoreError> {
        if let Some(hour) = model.auto_upgrade_hour.as_known() {
            if !(0..=23).contains(hour) {
                return Err(CoreError::validation(
                    Self::TYPE_NAME,
                    format!("auto_upgrade_hour must be 0-23, got {hour}"),
                ));
            }
        }

        let ssh_keys = convert::wire_list(&model.ssh_keys)
            .into_iter()
            .map(|k| SshKey {
                name: k.name,
                key_type: k.key_type,
                key: k.key.unwrap_or_default(),
                comment: k.comment.unwrap_or_default(),
            })
            .collect();

        Ok(SettingMgmt {
            id: convert::wire_string(&model.id),
            key: SETTING_KEY.to_owned(),
            auto_upgrade: convert::wire_opt(&model.auto_upgrade),
            auto_upgrade_hour: convert::wire_opt(&model.auto_upgrade_hour),
            led_enabled: convert::wire_opt(&model.led_enabled),
            alert_enabled: convert::wire_opt(&model.alert_enabled),
            advanced_feature_enabled: convert::wire_opt(&model.advanced_feature_enabled),
            x_ssh_enabled: convert::wire_opt(&model.ssh_enabled),
            x_ssh_auth_password_enabled: convert::wire_opt(&model.ssh_auth_password_enabled),
            x_ssh_bind_wildcard: convert::wire_opt(&model.ssh_bind_wildcard),
            x_ssh_username: convert::wire_string(&model.ssh_username),
            x_ssh_password: convert::wire_string(&model.ssh_password),
            x_ssh_keys: ssh_keys,
            ..SettingMgmt::default()
        })
    }

    fn from_remote(object: &SettingMgmt, prior: &SettingMgmtModel, site: &str) -> SettingMgmtModel {
        let ssh_keys: Vec<SshKeyModel> = object
            .x_ssh_keys
            .iter()
            .map(|k| SshKeyModel {
                name: k.name.clone(),
                key_type: k.key_type.clone(),
                key: Some(k.key.clone()).filter(|v| !v.is_empty()),
                comment: Some(k.comment.clone()).filter(|v| !v.is_empty()),
            })
            .collect();

        SettingMgmtModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            auto_upgrade: convert::flag(object.auto_upgrade),
            auto_upgrade_hour: convert::int_zero_ok(object.auto_upgrade_hour),
            led_enabled: convert::flag(object.led_enabled),
            alert_enabled: convert::flag(object.alert_enabled),
            advanced_feature_enabled: convert::flag(object.advanced_feature_enabled),
            ssh_enabled: convert::flag(object.x_ssh_enabled),
            ssh_auth_password_enabled: convert::flag(object.x_ssh_auth_password_enabled),
            ssh_bind_wildcard: convert::flag(object.x_ssh_bind_wildcard),
            ssh_username: convert::string(&object.x_ssh_username),
            ssh_password: convert::write_only(&prior.ssh_password),
            ssh_keys: convert::list(&ssh_keys),
        }
    }

    /// `<site>` names the site's settings document; `<site>:<id>` pins
    /// its id.
    fn parse_import(raw: &str, default_site: &str) -> Result<ImportTarget, CoreError> {
        let raw = raw.trim();
        if raw.contains(':') {
            return import::parse(Self::TYPE_NAME, raw, default_site);
        }
        let site = if raw.is_empty() { default_site } else { raw };
        Ok(ImportTarget::new(site, ImportKey::NaturalKey(SETTING_KEY.to_owned())))
    }
}
