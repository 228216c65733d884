//! `boostpkg libs` command

use anyhow::{bail, Result};

use crate::cli::LibsArgs;
use boostpkg::builder::LibraryNaming;

pub fn execute(args: LibsArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    let naming = ctx.naming()?;

    if args.suffix {
        match naming {
            LibraryNaming::Decorated { ref suffix, .. } => println!("{}", suffix),
            LibraryNaming::Plain => bail!(
                "compiler `{}` does not use decorated library names",
                ctx.settings.compiler.family
            ),
        }
        return Ok(());
    }

    for name in naming.decorate_all(ctx.recipe.libraries) {
        println!("{}", name);
    }
    Ok(())
}
