//! `show`: print tracked state without contacting the controller.

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;
use crate::state_file::StateFile;

use super::util::{self, ResourceRow, ResourceView};

pub fn handle(args: &ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let state = StateFile::load(&global.state)?;

    if let Some(ref address) = args.address {
        let resource = state.require(address)?;
        return util::print_resource(global, address, resource);
    }

    let views: Vec<ResourceView<'_>> = state
        .resources
        .iter()
        .map(|(address, resource)| ResourceView {
            address: address.as_str(),
            resource,
        })
        .collect();
    let out = output::render_list(global.output, &views, |v| ResourceRow::from(v))?;
    output::print_output(&out, global.quiet);
    Ok(())
}
