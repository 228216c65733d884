//! `boostpkg flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    let flags = ctx.flags();

    if args.list {
        for token in flags.tokens() {
            println!("{}", token);
        }
        return Ok(());
    }

    println!("{}", ctx.bootstrap().display_command());
    println!("{}", ctx.display_b2_command());
    Ok(())
}
