//! `apply`: Create an untracked resource, or Update a tracked one.

use std::sync::Arc;

use tracing::info;

use unifi_tf_core::{ControllerApi, MemoryStore, Reconciler};

use crate::cli::ApplyArgs;
use crate::error::CliError;
use crate::state_file::StateFile;

use super::{Context, util};

pub async fn handle(args: ApplyArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let rt = util::resource_type(&args.resource_type)?;
    util::check_address(&args.address)?;
    let plan = util::read_plan(&args.plan)?;

    let mut state = StateFile::load(&ctx.global.state)?;
    let (mut store, tracked) = match state.get(&args.address) {
        Some(existing) if existing.resource_type != rt.type_name() => {
            return Err(CliError::Validation {
                field: "address".into(),
                reason: format!(
                    "'{}' tracks a {}, not a {rt}",
                    args.address, existing.resource_type
                ),
            });
        }
        Some(existing) => (existing.to_store().with_plan(plan), true),
        None => (MemoryStore::new().with_plan(plan), false),
    };

    let conn = ctx.connect().await?;
    let result = unifi_tf_core::with_resource_kind!(rt, K => {
        let reconciler = Reconciler::<K, ControllerApi>::new(Arc::clone(&conn.api), conn.site.clone());
        if tracked {
            reconciler.update(&mut store, &ctx.cancel).await
        } else {
            reconciler.create(&mut store, &ctx.cancel).await
        }
    });
    conn.close().await;
    result?;

    state.record(&args.address, rt.type_name(), store);
    state.save()?;
    info!(
        address = %args.address,
        resource = %rt,
        action = if tracked { "update" } else { "create" },
        "applied"
    );

    let resource = state.require(&args.address)?;
    util::print_resource(ctx.global, &args.address, resource)
}
