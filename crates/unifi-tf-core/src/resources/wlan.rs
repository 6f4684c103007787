// ── unifi_wlan ──
//
// Wireless networks in `rest/wlanconf`, keyed by SSID name. A minimum data
// rate of 0 turns the per-band minimum off, so it must be able to
// override a configured rate.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::{Wlan, WlanSchedule};

use crate::convert;
use crate::error::CoreError;
use crate::kind::{ResourceKind, TrackedModel};
use crate::merge::MergePolicy;
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

const DEFAULT_SECURITY: &str = "wpapsk";

merge_fields!(WlanSchedule {
    start_days_of_week,
    start_hour,
    start_minute,
    duration_minutes,
    name,
});

merge_fields!(Wlan {
    id,
    site_id,
    attr_hidden_id,
    attr_no_delete,
    name,
    enabled,
    security,
    wpa_mode,
    wpa_enc,
    x_passphrase,
    networkconf_id,
    usergroup_id,
    ap_group_ids,
    hide_ssid,
    is_guest,
    l2_isolation,
    uapsd_enabled,
    fast_roaming_enabled,
    pmf_mode,
    wlan_bands,
    mac_filter_enabled,
    mac_filter_list,
    mac_filter_policy,
    minrate_setting_preference,
    minrate_ng_enabled,
    minrate_ng_data_rate_kbps,
    minrate_na_enabled,
    minrate_na_data_rate_kbps,
    schedule_with_duration,
    extra,
});

/// One broadcast window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleWindow {
    pub days: Vec<String>,
    pub start_hour: i64,
    pub start_minute: i64,
    pub duration_minutes: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WlanModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub name: Value<String>,
    pub enabled: Value<bool>,
    pub security: Value<String>,
    pub wpa_mode: Value<String>,
    /// Write-only.
    pub passphrase: Value<String>,
    pub network_id: Value<String>,
    pub user_group_id: Value<String>,
    pub ap_group_ids: Value<Vec<String>>,
    pub hide_ssid: Value<bool>,
    pub is_guest: Value<bool>,
    pub l2_isolation: Value<bool>,
    pub uapsd: Value<bool>,
    pub fast_roaming_enabled: Value<bool>,
    pub pmf_mode: Value<String>,
    pub wlan_bands: Value<Vec<String>>,
    pub mac_filter_enabled: Value<bool>,
    pub mac_filter_list: Value<Vec<String>>,
    pub mac_filter_policy: Value<String>,
    pub minimum_data_rate_2g_kbps: Value<i64>,
    pub minimum_data_rate_5g_kbps: Value<i64>,
    pub schedule: Value<Vec<ScheduleWindow>>,
    pub allow_existing: Value<bool>,
}

overlay_fields!(WlanModel {
    id,
    site,
    name,
    enabled,
    security,
    wpa_mode,
    passphrase,
    network_id,
    user_group_id,
    ap_group_ids,
    hide_ssid,
    is_guest,
    l2_isolation,
    uapsd,
    fast_roaming_enabled,
    pmf_mode,
    wlan_bands,
    mac_filter_enabled,
    mac_filter_list,
    mac_filter_policy,
    minimum_data_rate_2g_kbps,
    minimum_data_rate_5g_kbps,
    schedule,
    allow_existing,
});

impl TrackedModel for WlanModel {
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

pub struct WlanKind;

impl ResourceKind for WlanKind {
    const TYPE_NAME: &'static str = "unifi_wlan";
    type Model = WlanModel;
    type Object = Wlan;

    fn merge_policy() -> MergePolicy {
        MergePolicy::default()
            .zero_meaningful("minrate_ng_data_rate_kbps")
            .zero_meaningful("minrate_na_data_rate_kbps")
    }

    fn object_id(object: &Wlan) -> &str {
        &object.id
    }

    fn object_natural_key(object: &Wlan) -> Option<String> {
        Some(object.name.clone()).filter(|n| !n.is_empty())
    }

    fn model_natural_key(model: &WlanModel) -> Option<String> {
        model.name.as_known().filter(|n| !n.is_empty()).cloned()
    }

    fn to_remote(model: &WlanModel) -> Result<Wlan, CoreError> {
        if model.id.as_known().is_none() && Self::model_natural_key(model).is_none() {
            return Err(CoreError::validation(Self::TYPE_NAME, "name is required"));
        }

        let schedule = convert::wire_list(&model.schedule)
            .into_iter()
            .map(|w| WlanSchedule {
                start_days_of_week: w.days,
                start_hour: Some(w.start_hour),
                start_minute: Some(w.start_minute),
                duration_minutes: Some(w.duration_minutes),
                name: w.name.unwrap_or_default(),
            })
            .collect();

        Ok(Wlan {
            id: convert::wire_string(&model.id),
            name: convert::wire_string(&model.name),
            enabled: convert::wire_opt(&model.enabled),
            security: convert::wire_string(&model.security),
            wpa_mode: convert::wire_string(&model.wpa_mode),
            x_passphrase: convert::wire_string(&model.passphrase),
            networkconf_id: convert::wire_string(&model.network_id),
            usergroup_id: convert::wire_string(&model.user_group_id),
            ap_group_ids: convert::wire_list(&model.ap_group_ids),
            hide_ssid: convert::wire_opt(&model.hide_ssid),
            is_guest: convert::wire_opt(&model.is_guest),
            l2_isolation: convert::wire_opt(&model.l2_isolation),
            uapsd_enabled: convert::wire_opt(&model.uapsd),
            fast_roaming_enabled: convert::wire_opt(&model.fast_roaming_enabled),
            pmf_mode: convert::wire_string(&model.pmf_mode),
            wlan_bands: convert::wire_list(&model.wlan_bands),
            mac_filter_enabled: convert::wire_opt(&model.mac_filter_enabled),
            mac_filter_list: convert::wire_list(&model.mac_filter_list),
            mac_filter_policy: convert::wire_string(&model.mac_filter_policy),
            minrate_ng_enabled: model.minimum_data_rate_2g_kbps.as_known().map(|r| *r != 0),
            minrate_ng_data_rate_kbps: convert::wire_opt(&model.minimum_data_rate_2g_kbps),
            minrate_na_enabled: model.minimum_data_rate_5g_kbps.as_known().map(|r| *r != 0),
            minrate_na_data_rate_kbps: convert::wire_opt(&model.minimum_data_rate_5g_kbps),
            schedule_with_duration: schedule,
            ..Wlan::default()
        })
    }

    fn prepare_create(object: &mut Wlan) -> Result<(), CoreError> {
        if object.security.is_empty() {
            object.security = DEFAULT_SECURITY.to_owned();
        }
        if object.security != "open" && object.x_passphrase.is_empty() {
            return Err(CoreError::validation(
                Self::TYPE_NAME,
                format!("passphrase is required for security {:?}", object.security),
            ));
        }
        Ok(())
    }

    fn from_remote(object: &Wlan, prior: &WlanModel, site: &str) -> WlanModel {
        let schedule: Vec<ScheduleWindow> = object
            .schedule_with_duration
            .iter()
            .map(|s| ScheduleWindow {
                days: s.start_days_of_week.clone(),
                start_hour: s.start_hour.unwrap_or_default(),
                start_minute: s.start_minute.unwrap_or_default(),
                duration_minutes: s.duration_minutes.unwrap_or_default(),
                name: Some(s.name.clone()).filter(|n| !n.is_empty()),
            })
            .collect();

        WlanModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            name: convert::string(&object.name),
            enabled: convert::flag(object.enabled),
            security: convert::string(&object.security),
            wpa_mode: convert::string(&object.wpa_mode),
            passphrase: convert::write_only(&prior.passphrase),
            network_id: convert::string(&object.networkconf_id),
            user_group_id: convert::string(&object.usergroup_id),
            ap_group_ids: convert::list(&object.ap_group_ids),
            hide_ssid: convert::flag(object.hide_ssid),
            is_guest: convert::flag(object.is_guest),
            l2_isolation: convert::flag(object.l2_isolation),
            uapsd: convert::flag(object.uapsd_enabled),
            fast_roaming_enabled: convert::flag(object.fast_roaming_enabled),
            pmf_mode: convert::string(&object.pmf_mode),
            wlan_bands: convert::list(&object.wlan_bands),
            mac_filter_enabled: convert::flag(object.mac_filter_enabled),
            mac_filter_list: convert::list(&object.mac_filter_list),
            mac_filter_policy: convert::string(&object.mac_filter_policy),
            minimum_data_rate_2g_kbps: min_rate(object.minrate_ng_enabled, object.minrate_ng_data_rate_kbps),
            minimum_data_rate_5g_kbps: min_rate(object.minrate_na_enabled, object.minrate_na_data_rate_kbps),
            schedule: convert::list(&schedule),
            allow_existing: prior.allow_existing.clone(),
        }
    }
}

/// A disabled minimum rate reads as 0.
fn min_rate(enabled: Option<bool>, rate: Option<i64>) -> Value<i64> {
    match enabled {
        Some(false) => Value::Known(0),
        _ => convert::int_zero_ok(rate),
    }
}
