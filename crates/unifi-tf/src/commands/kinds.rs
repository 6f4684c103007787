//! `kinds`: the resource type catalogue.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use unifi_tf_core::{CreateMode, DeleteMode, ReadMiss, ResourceType};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize, Tabled)]
struct KindRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    type_name: &'static str,
    #[tabled(rename = "Create")]
    create: &'static str,
    #[tabled(rename = "Delete")]
    delete: &'static str,
    #[tabled(rename = "Read miss")]
    read_miss: &'static str,
    #[tabled(rename = "Allow existing")]
    allow_existing: bool,
    #[tabled(skip)]
    skip_fields: Vec<String>,
    #[tabled(skip)]
    zero_meaningful: Vec<String>,
}

impl From<ResourceType> for KindRow {
    fn from(rt: ResourceType) -> Self {
        let caps = rt.capabilities();
        let policy = rt.merge_policy();
        Self {
            type_name: rt.type_name(),
            create: match caps.create {
                CreateMode::Post => "create",
                CreateMode::Singleton => "absorb",
            },
            delete: match caps.delete {
                DeleteMode::ById => "by id",
                DeleteMode::ByNaturalKey => "by key",
                DeleteMode::Disown => "disown",
            },
            read_miss: match caps.read_miss {
                ReadMiss::Deregister => "deregister",
                ReadMiss::Error => "error",
            },
            allow_existing: rt.supports_allow_existing(),
            skip_fields: policy.skip_fields().map(str::to_owned).collect(),
            zero_meaningful: policy.zero_meaningful_fields().map(str::to_owned).collect(),
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let rows: Vec<KindRow> = ResourceType::iter().map(KindRow::from).collect();
    let out = output::render_list(global.output, &rows, |r| KindRow {
        skip_fields: Vec::new(),
        zero_meaningful: Vec::new(),
        ..*r
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
