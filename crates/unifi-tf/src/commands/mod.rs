//! Command handlers and the shared connection context.

pub mod apply;
pub mod destroy;
pub mod import;
pub mod kinds;
pub mod refresh;
pub mod show;
mod util;

use std::sync::Arc;

use clap::CommandFactory;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use unifi_tf_core::ControllerApi;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// What every handler gets: the global flags and the Ctrl-C token.
pub struct Context<'a> {
    pub global: &'a GlobalOpts,
    pub cancel: CancellationToken,
}

/// A live controller session plus the default site.
pub struct Connection {
    pub api: Arc<ControllerApi>,
    pub site: String,
}

impl Context<'_> {
    /// Resolve configuration and log in. Handlers call this only once they
    /// know they need the controller.
    pub async fn connect(&self) -> Result<Connection, CliError> {
        let provider = config::provider_config(self.global)?;
        debug!(url = %provider.url, site = %provider.site, "connecting");

        let api = tokio::select! {
            () = self.cancel.cancelled() => {
                return Err(CliError::Cancelled { operation: "connect".into() });
            }
            api = ControllerApi::connect(&provider) => api?,
        };
        Ok(Connection {
            api: Arc::new(api),
            site: provider.site,
        })
    }
}

impl Connection {
    pub async fn close(self) {
        self.api.disconnect().await;
    }
}

pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Kinds => kinds::handle(ctx.global),
        Command::Import(args) => import::handle(args, ctx).await,
        Command::Refresh(args) => refresh::handle(args, ctx).await,
        Command::Apply(args) => apply::handle(args, ctx).await,
        Command::Destroy(args) => destroy::handle(args, ctx).await,
        Command::Show(args) => show::handle(&args, ctx.global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "unifi-tf", &mut std::io::stdout());
            Ok(())
        }
    }
}
