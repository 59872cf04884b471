//! Single lookup command

use crate::cli::{CommandContext, GlobalOptions, LookupArgs};
use crate::output;
use wurfl_cloud::Headers;

/// Resolve one user agent or header set and print the device
pub async fn run(args: LookupArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let ctx = CommandContext::new(opts)?;

    let headers: Headers = args.headers.into_iter().collect();
    let headers = (!headers.is_empty()).then_some(headers);

    let record = ctx
        .resolver
        .resolve(
            args.user_agent.as_deref(),
            headers.as_ref(),
            &args.capabilities.names(),
        )
        .await?;

    output::print(&record, ctx.format)?;
    log::debug!("Resolver stats: {:?}", ctx.resolver.stats());
    Ok(())
}
