// ── unifi_port_forward ──

use serde::{Deserialize, Serialize};
use unifi_tf_api::legacy::models::PortForward;

use crate::convert;
use crate::error::CoreError;
use crate::kind::{ResourceKind, TrackedModel};
use crate::model::Value;
use crate::{merge_fields, overlay_fields};

const PROTOCOLS: &[&str] = &["tcp", "udp", "tcp_udp"];

merge_fields!(PortForward {
    id,
    site_id,
    name,
    enabled,
    pfwd_interface,
    fwd,
    fwd_port,
    dst_port,
    proto,
    src,
    log,
    extra,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortForwardModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub name: Value<String>,
    pub enabled: Value<bool>,
    pub port_forward_interface: Value<String>,
    pub fwd_ip: Value<String>,
    pub fwd_port: Value<String>,
    pub dst_port: Value<String>,
    pub protocol: Value<String>,
    pub src_ip: Value<String>,
    pub log: Value<bool>,
}

overlay_fields!(PortForwardModel {
    id,
    site,
    name,
    enabled,
    port_forward_interface,
    fwd_ip,
    fwd_port,
    dst_port,
    protocol,
    src_ip,
    log,
});

impl TrackedModel for PortForwardModel {
    fn id(&self) -> &Value<String> {
        &self.id
    }

    fn site(&self) -> &Value<String> {
        &self.site
    }
}

pub struct PortForwardKind;

impl ResourceKind for PortForwardKind {
    const TYPE_NAME: &'static str = "unifi_port_forward";
    type Model = PortForwardModel;
    type Object = PortForward;

    fn object_id(object: &PortForward) -> &str {
        &object.id
    }

    fn object_natural_key(object: &PortForward) -> Option<String> {
        Some(object.name.clone()).filter(|n| !n.is_empty())
    }

    fn model_natural_key(model: &PortForwardModel) -> Option<String> {
        model.name.as_known().filter(|n| !n.is_empty()).cloned()
    }

    fn to_remote(model: &PortForwardModel) -> Result<PortForward, CoreError> {
        if model.id.as_known().is_none() && Self::model_natural_key(model).is_none() {
            return Err(CoreError::validation(Self::TYPE_NAME, "name is required"));
        }
        let protocol = convert::wire_string(&model.protocol);
        if !protocol.is_empty() && !PROTOCOLS.contains(&protocol.as_str()) {
            return Err(CoreError::validation(
                Self::TYPE_NAME,
                format!("protocol must be one of {PROTOCOLS:?}, got {protocol:?}"),
            ));
        }

        Ok(PortForward {
            id: convert::wire_string(&model.id),
            name: convert::wire_string(&model.name),
            enabled: convert::wire_opt(&model.enabled),
            pfwd_interface: convert::wire_string(&model.port_forward_interface),
            fwd: convert::wire_string(&model.fwd_ip),
            fwd_port: convert::wire_string(&model.fwd_port),
            dst_port: convert::wire_string(&model.dst_port),
            proto: protocol,
            src: convert::wire_string(&model.src_ip),
            log: convert::wire_opt(&model.log),
            ..PortForward::default()
        })
    }

    fn from_remote(object: &PortForward, _prior: &PortForwardModel, site: &str) -> PortForwardModel {
        PortForwardModel {
            id: convert::string(&object.id),
            site: Value::from(site),
            name: convert::string(&object.name),
            enabled: convert::flag(object.enabled),
            port_forward_interface: convert::string(&object.pfwd_interface),
            fwd_ip: convert::string(&object.fwd),
            fwd_port: convert::string(&object.fwd_port),
            dst_port: convert::string(&object.dst_port),
            protocol: convert::string(&object.proto),
            // "any" is how the controller spells an unset source.
            src_ip: if object.src == "any" {
                Value::Null
            } else {
                convert::string(&object.src)
            },
            log: convert::flag(object.log),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_protocol() {
        let model = PortForwardModel {
            name: Value::from("ssh"),
            protocol: Value::from("icmp"),
            ..PortForwardModel::default()
        };
        assert!(matches!(
            PortForwardKind::to_remote(&model),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn any_source_reads_as_null() {
        let remote = PortForward {
            id: "pf1".into(),
            name: "ssh".into(),
            src: "any".into(),
            proto: "tcp".into(),
            ..PortForward::default()
        };
        let model = PortForwardKind::from_remote(&remote, &PortForwardModel::default(), "default");
        assert!(model.src_ip.is_null());
        assert_eq!(model.protocol, Value::from("tcp"));
        assert!(!model.allow_existing());
    }
}
