//! `boostpkg package` command

use anyhow::Result;

use crate::cli::PackageArgs;
use boostpkg::ops::PackageSummary;
use boostpkg::BuildContext;

pub fn execute(args: PackageArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;
    let summary = boostpkg::ops::package(&ctx)?;
    report(&ctx, &summary);
    Ok(())
}

pub(crate) fn report(ctx: &BuildContext, summary: &PackageSummary) {
    println!("Packaged {}/{} into {}", ctx.recipe.name, ctx.recipe.version, ctx.package_dir.display());
    println!(
        "  {} headers, {} libraries, {} exported files",
        summary.header_count,
        summary.libs.len(),
        summary.exports.len()
    );
    if !summary.missing.is_empty() {
        println!("  missing: {}", summary.missing.join(", "));
    }
}
