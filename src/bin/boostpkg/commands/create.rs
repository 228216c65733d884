//! `boostpkg create` command

use anyhow::Result;

use crate::cli::CreateArgs;

pub fn execute(args: CreateArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    let summary = boostpkg::ops::create(&ctx, &args.source.into())?;
    super::package::report(&ctx, &summary);
    Ok(())
}
