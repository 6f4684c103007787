//! `destroy`: Delete a tracked resource (or disown it, for kinds that are
//! never removed from the controller).

use std::sync::Arc;

use tracing::info;

use unifi_tf_core::{ControllerApi, DeleteMode, Reconciler};

use crate::cli::DestroyArgs;
use crate::error::CliError;
use crate::state_file::StateFile;

use super::{Context, util};

pub async fn handle(args: DestroyArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let mut state = StateFile::load(&ctx.global.state)?;
    let tracked = state.require(&args.address)?;
    let rt = util::resource_type(&tracked.resource_type)?;
    let mut store = tracked.to_store();

    let disown = rt.capabilities().delete == DeleteMode::Disown;
    let prompt = if disown {
        format!("Stop tracking {} ({rt})? The controller object is left as is.", args.address)
    } else {
        format!("Delete {} ({rt}) from the controller?", args.address)
    };
    if !util::confirm("destroy", &prompt, args.yes)? {
        return Ok(());
    }

    let conn = ctx.connect().await?;
    let result = unifi_tf_core::with_resource_kind!(rt, K => {
        Reconciler::<K, ControllerApi>::new(Arc::clone(&conn.api), conn.site.clone())
            .delete(&mut store, &ctx.cancel)
            .await
    });
    conn.close().await;
    result?;

    state.record(&args.address, rt.type_name(), store);
    state.save()?;
    info!(address = %args.address, resource = %rt, disown, "destroyed");

    if !ctx.global.quiet {
        if disown {
            eprintln!("{} no longer tracked", args.address);
        } else {
            eprintln!("{} destroyed", args.address);
        }
    }
    Ok(())
}
