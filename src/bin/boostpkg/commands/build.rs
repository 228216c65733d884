//! `boostpkg build` command

use anyhow::Result;

use crate::cli::BuildArgs;

pub fn execute(args: BuildArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    boostpkg::ops::build(&ctx)?;
    println!("Built {} into {}", ctx.recipe.folder_name(), ctx.stage_lib_dir().display());
    Ok(())
}
