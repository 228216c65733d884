//! `source` -> `build` -> `package` in one run.

use anyhow::{Context, Result};

use crate::builder::BuildContext;
use crate::ops::build::build;
use crate::ops::package::{package, PackageSummary};
use crate::ops::source::{fetch_source, SourceOptions};

/// Run every recipe step in order. The first failing step aborts the run.
pub fn create(ctx: &BuildContext, source: &SourceOptions) -> Result<PackageSummary> {
    tracing::info!(
        "Creating {}/{} for {}",
        ctx.recipe.name,
        ctx.recipe.version,
        ctx.settings.to_pairs().join(" ")
    );

    fetch_source(ctx, source).context("source step failed")?;
    build(ctx).context("build step failed")?;
    package(ctx).context("package step failed")
}
