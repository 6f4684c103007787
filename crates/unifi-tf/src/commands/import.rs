//! `import`: start tracking an existing controller object.

use std::sync::Arc;

use tracing::info;

use unifi_tf_core::{ControllerApi, MemoryStore, Reconciler};

use crate::cli::ImportArgs;
use crate::error::CliError;
use crate::state_file::StateFile;

use super::{Context, util};

pub async fn handle(args: ImportArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let rt = util::resource_type(&args.resource_type)?;
    util::check_address(&args.address)?;

    let mut state = StateFile::load(&ctx.global.state)?;
    if let Some(existing) = state.get(&args.address) {
        return Err(CliError::Validation {
            field: "address".into(),
            reason: format!(
                "'{}' already tracks a {}; destroy it or pick another address",
                args.address, existing.resource_type
            ),
        });
    }

    let conn = ctx.connect().await?;
    let mut store = MemoryStore::new();
    let result = unifi_tf_core::with_resource_kind!(rt, K => {
        Reconciler::<K, ControllerApi>::new(Arc::clone(&conn.api), conn.site.clone())
            .import(&args.identifier, &mut store, &ctx.cancel)
            .await
    });
    conn.close().await;
    result?;

    state.record(&args.address, rt.type_name(), store);
    state.save()?;
    info!(address = %args.address, resource = %rt, "imported");

    let tracked = state.require(&args.address)?;
    util::print_resource(ctx.global, &args.address, tracked)
}
