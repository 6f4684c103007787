// ── unifi_site ──
//
// Sites are controller-scoped: the object is not namespaced under another
// site, so the model carries no `site` attribute. The controller picks the
// short `name`; users only choose the description.

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::Site;

use crate::convert;
use crate::error::CoreError;
use crate::kind::{Capabilities, ReadMiss, ResourceKind, TrackedModel};
use crate::merge::MergePolicy;
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

static NO_SITE: Value<String> = Value::Null;

merge_fields!(Site {
    id,
    name,
    desc,
    role,
    attr_hidden_id,
    attr_no_delete,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteModel {
    pub id: Value<String>,
    /// Computed short name used in site-scoped URLs.
    pub name: Value<String>,
    pub description: Value<String>,
}

overlay_fields!(SiteModel {
    id,
    name,
    description,
});

impl TrackedModel for SiteModel {
    fn id(&self) -> &Value<String> {
        &self.id
    }

    fn site(&self) -> &Value<String> {
        &NO_SITE
    }
}

pub struct SiteKind;

impl ResourceKind for SiteKind {
    const TYPE_NAME: &'static str = "unifi_site";
    type Model = SiteModel;
    type Object = Site;

    fn capabilities() -> Capabilities {
        Capabilities {
            read_miss: ReadMiss::Error,
            ..Capabilities::default()
        }
    }

    fn merge_policy() -> MergePolicy {
        MergePolicy::default().skip("name").skip("role")
    }

    fn object_id(object: &Site) -> &str {
        &object.id
    }

    fn object_natural_key(object: &Site) -> Option<String> {
        Some(object.name.clone()).filter(|n| !n.is_empty())
    }

    fn model_natural_key(model: &SiteModel) -> Option<String> {
        model.name.as_known().filter(|n| !n.is_empty()).cloned()
    }

    fn to_remote(model: &SiteModel) -> Result<Site, CoreError> {
        let description = convert::wire_string(&model.description);
        if description.is_empty() && model.id.as_known().is_none() {
            return Err(CoreError::validation(
                Self::TYPE_NAME,
                "description is required",
            ));
        }
        Ok(Site {
            id: convert::wire_string(&model.id),
            name: convert::wire_string(&model.name),
            desc: description,
            ..Site::default()
        })
    }

    fn from_remote(object: &Site, _prior: &SiteModel, _site: &str) -> SiteModel {
        SiteModel {
            id: convert::string(&object.id),
            name: convert::string(&object.name),
            description: convert::string(&object.desc),
        }
    }

    fn matches_name(object: &Site, name: &str) -> bool {
        object.name == name || object.desc == name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::merge::Merge;

    #[test]
    fn description_is_required_on_create() {
        assert!(SiteKind::to_remote(&SiteModel::default()).is_err());
    }

    #[test]
    fn short_name_is_never_overwritten() {
        let remote = Site {
            id: "s1".into(),
            name: "x7kq2b1m".into(),
            desc: "Branch".into(),
            role: "admin".into(),
            ..Site::default()
        };
        let planned = Site {
            name: "branch".into(),
            desc: "Branch office".into(),
            role: "readonly".into(),
            ..Site::default()
        };
        let merged = remote.merged(&planned, &SiteKind::merge_policy());
        assert_eq!(merged.name, "x7kq2b1m");
        assert_eq!(merged.role, "admin");
        assert_eq!(merged.desc, "Branch office");
    }

    #[test]
    fn name_lookup_accepts_short_name_or_description() {
        let site = Site {
            name: "x7kq2b1m".into(),
            desc: "Branch".into(),
            ..Site::default()
        };
        assert!(SiteKind::matches_name(&site, "x7kq2b1m"));
        assert!(SiteKind::matches_name(&site, "Branch"));
        assert!(!SiteKind::matches_name(&site, "HQ"));
    }

    #[test]
    fn has_no_enclosing_site() {
        assert!(SiteModel::default().site().is_null());
        assert_eq!(SiteKind::capabilities().read_miss, ReadMiss::Error);
    }
}
