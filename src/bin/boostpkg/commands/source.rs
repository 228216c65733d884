//! `boostpkg source` command

use anyhow::Result;

use crate::cli::SourceArgs;
use boostpkg::ops::fetch_source;

pub fn execute(args: SourceArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    let source_dir = fetch_source(&ctx, &args.source.into())?;
    println!("Source ready at {}", source_dir.display());
    Ok(())
}
