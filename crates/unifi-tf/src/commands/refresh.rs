//! `refresh`: Read every tracked resource (or one) from the controller.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;
use tracing::{info, warn};

use unifi_tf_core::{ControllerApi, ReadOutcome, Reconciler};

use crate::cli::RefreshArgs;
use crate::error::CliError;
use crate::output;
use crate::state_file::StateFile;

use super::{Connection, Context, util};

#[derive(Debug, Clone, Serialize, Tabled)]
struct RefreshRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    resource_type: String,
    #[tabled(rename = "Result")]
    result: &'static str,
}

pub async fn handle(args: RefreshArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let mut state = StateFile::load(&ctx.global.state)?;

    let addresses: Vec<String> = match args.address {
        Some(address) => {
            state.require(&address)?;
            vec![address]
        }
        None => state.resources.keys().cloned().collect(),
    };
    if addresses.is_empty() {
        if !ctx.global.quiet {
            eprintln!("Nothing tracked in {}", state.path().display());
        }
        return Ok(());
    }

    let conn = ctx.connect().await?;
    let mut rows = Vec::with_capacity(addresses.len());
    let mut failure = None;
    for address in &addresses {
        match refresh_one(&mut state, address, &conn, ctx).await {
            Ok(row) => rows.push(row),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    conn.close().await;

    // Keep whatever was refreshed before a failure.
    state.save()?;
    if let Some(e) = failure {
        return Err(e);
    }

    let out = output::render_list(ctx.global.output, &rows, RefreshRow::clone)?;
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

async fn refresh_one(
    state: &mut StateFile,
    address: &str,
    conn: &Connection,
    ctx: &Context<'_>,
) -> Result<RefreshRow, CliError> {
    let tracked = state.require(address)?;
    let rt = util::resource_type(&tracked.resource_type)?;
    let mut store = tracked.to_store();

    let outcome = unifi_tf_core::with_resource_kind!(rt, K => {
        Reconciler::<K, ControllerApi>::new(Arc::clone(&conn.api), conn.site.clone())
            .read(&mut store, &ctx.cancel)
            .await
    })?;
    state.record(address, rt.type_name(), store);

    let result = match outcome {
        ReadOutcome::Present => {
            info!(address, resource = %rt, "refreshed");
            "refreshed"
        }
        ReadOutcome::Removed => {
            warn!(address, resource = %rt, "gone from the controller, no longer tracked");
            "removed"
        }
    };
    Ok(RefreshRow {
        address: address.to_owned(),
        resource_type: rt.type_name().to_owned(),
        result,
    })
}
