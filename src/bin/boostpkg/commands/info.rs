//! `boostpkg info` command

use anyhow::Result;

use crate::cli::InfoArgs;

pub fn execute(args: InfoArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    let info = ctx.package_info()?;

    if args.json {
        println!("{}", info.to_json()?);
        return Ok(());
    }

    println!("{}/{}", info.name, info.version);
    println!("  include: {}", info.include_dirs.join(" "));
    println!("  lib:     {}", info.lib_dirs.join(" "));
    println!("  defines: {}", info.defines.join(" "));
    println!("  flags:   {}", info.gcc_flags().join(" "));
    println!("  libs:");
    for lib in &info.libs {
        println!("    {}", lib);
    }
    Ok(())
}
